//! Document scanning: per-page classification, deduplication and the
//! fallback cascade.
//!
//! Pages are read in order. Every usable token is recorded together with a
//! font size histogram; if the classifier finds no heading anywhere in the
//! document, the recorded tokens are rescanned with looser rules.

use std::collections::{HashMap, HashSet};

use crate::error::Result;
use crate::model::{HeadingEntry, HeadingLevel, WordRecord};
use crate::normalize::TextNormalizer;

use super::backend::PageSource;
use super::classify::{classify, HeadingCandidate, NUMBERED_PREFIX};
use super::options::{ErrorMode, OutlineOptions};
use super::reconstruct::{looks_glyph_granular, reconstruct_page};

/// Tokens longer than this (in characters) are ignored entirely.
pub const MAX_TOKEN_CHARS: usize = 90;
/// Fallback candidates must be longer than this.
pub const FALLBACK_MIN_CHARS: usize = 3;
/// Fallback candidates must be shorter than this.
pub const FALLBACK_MAX_CHARS: usize = 100;
/// Number of distinct largest sizes considered by the largest-font fallback.
pub const FALLBACK_SIZE_RANKS: usize = 3;
/// Page number reported for headings found by a fallback.
pub const FALLBACK_PAGE: u32 = 1;
/// Words never promoted by the largest-font fallback.
pub const STOP_WORDS: &[&str] = &["page", "of", "the", "and", "or", "in", "on", "at", "to", "for"];

/// Font size histogram for one document.
#[derive(Debug, Clone, Default)]
pub struct FontStat {
    /// Occurrences keyed by size in hundredths of a point
    size_histogram: HashMap<i64, usize>,
}

impl FontStat {
    /// Add a font size observation.
    pub fn add_size(&mut self, size: f32) {
        *self.size_histogram.entry(size_key(size)).or_insert(0) += 1;
    }

    /// Number of observations of a size.
    pub fn count(&self, size: f32) -> usize {
        self.size_histogram
            .get(&size_key(size))
            .copied()
            .unwrap_or(0)
    }

    /// Up to `n` distinct sizes, largest first.
    pub fn largest_sizes(&self, n: usize) -> Vec<f32> {
        self.top_ranks(n).sizes()
    }

    /// The `n` largest distinct sizes, for repeated rank lookups.
    pub fn top_ranks(&self, n: usize) -> SizeRanks {
        let mut keys: Vec<i64> = self.size_histogram.keys().copied().collect();
        keys.sort_unstable_by(|a, b| b.cmp(a));
        keys.truncate(n);
        SizeRanks { keys }
    }

    /// Whether nothing has been observed.
    pub fn is_empty(&self) -> bool {
        self.size_histogram.is_empty()
    }
}

/// The largest distinct sizes of a document, largest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeRanks {
    keys: Vec<i64>,
}

impl SizeRanks {
    /// Rank of a size (0 = largest), or `None` outside the top sizes.
    pub fn rank_of(&self, size: f32) -> Option<usize> {
        let key = size_key(size);
        self.keys.iter().position(|k| *k == key)
    }

    /// The ranked sizes in points.
    pub fn sizes(&self) -> Vec<f32> {
        self.keys.iter().map(|k| *k as f32 / 100.0).collect()
    }
}

fn size_key(size: f32) -> i64 {
    (f64::from(size) * 100.0).round() as i64
}

/// A token kept for the fallback pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Trimmed token text, before normalization
    pub text: String,
    /// Font size in points
    pub size: f32,
    /// Font name as reported by the page source
    pub fontname: String,
    /// Horizontal offset from the left page edge
    pub indent: f32,
}

/// Headings of one document, deduplicated on (lower-cased text, level).
#[derive(Debug, Clone, Default)]
pub struct HeadingSet {
    seen: HashSet<(String, HeadingLevel)>,
    entries: Vec<HeadingEntry>,
}

impl HeadingSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry unless its key was already seen. Returns whether it
    /// was added.
    pub fn insert(&mut self, entry: HeadingEntry) -> bool {
        if entry.text.trim().is_empty() || !self.seen.insert(entry.key()) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Headings in insertion order.
    pub fn entries(&self) -> &[HeadingEntry] {
        &self.entries
    }

    /// Number of headings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no heading has been added.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume the set, returning headings in insertion order.
    pub fn into_entries(self) -> Vec<HeadingEntry> {
        self.entries
    }
}

/// Which pass produced a document's headings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStage {
    /// The layout classifier
    Classifier,
    /// The largest-font fallback
    LargestFont,
    /// The numbered-prefix fallback
    NumberedPattern,
    /// Nothing found
    Empty,
}

/// Result of scanning one document.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    /// Headings in the order first encountered
    pub headings: Vec<HeadingEntry>,
    /// The pass that produced them
    pub stage: ScanStage,
}

/// Running state of one document's scan.
#[derive(Debug, Default)]
pub struct DocumentScan {
    /// Headings accepted so far
    pub headings: HeadingSet,
    /// Sizes of every kept token
    pub font_stat: FontStat,
    /// Every kept token, in page order, for the fallbacks
    pub tokens: Vec<Token>,
}

/// Scans the pages of one document for headings.
pub struct OutlineScanner<'a, S: PageSource + ?Sized> {
    source: &'a S,
    options: &'a OutlineOptions,
    normalizer: TextNormalizer,
}

impl<'a, S: PageSource + ?Sized> OutlineScanner<'a, S> {
    /// Create a scanner over a page source.
    pub fn new(source: &'a S, options: &'a OutlineOptions) -> Self {
        Self {
            source,
            options,
            normalizer: TextNormalizer::new(options.phrases.clone()),
        }
    }

    /// Scan every page and return the headings found.
    pub fn scan(&self) -> Result<Vec<HeadingEntry>> {
        Ok(self.scan_with_stage()?.headings)
    }

    /// Scan every page, reporting which pass produced the headings.
    pub fn scan_with_stage(&self) -> Result<ScanOutcome> {
        let mut scan = DocumentScan::default();
        let total_pages = self.source.page_count();

        for page_num in 1..=total_pages {
            match self.page_words(page_num) {
                Ok(words) => self.scan_page(page_num, &words, &mut scan),
                Err(e) => {
                    if self.options.error_mode == ErrorMode::Strict {
                        return Err(e);
                    }
                    log::warn!("Skipping page {}: {}", page_num, e);
                }
            }
        }

        let stage = if !scan.headings.is_empty() {
            ScanStage::Classifier
        } else {
            log::debug!("No headings found with strict criteria, trying fallbacks");
            self.apply_fallbacks(&mut scan)
        };

        log::debug!(
            "Found {} headings ({:?}) in {} pages",
            scan.headings.len(),
            stage,
            total_pages
        );

        Ok(ScanOutcome {
            headings: scan.headings.into_entries(),
            stage,
        })
    }

    /// Word records for a page, rebuilt from glyphs when the page is
    /// extracted character by character.
    pub fn page_words(&self, page_num: u32) -> Result<Vec<WordRecord>> {
        let words = self.source.words(page_num)?;
        if !looks_glyph_granular(&words) {
            return Ok(words);
        }

        log::debug!(
            "Page {}: character-level extraction detected, reconstructing words",
            page_num
        );
        let glyphs = self.source.glyphs(page_num, &self.options.glyph_mode)?;
        Ok(reconstruct_page(glyphs))
    }

    /// Classify one page's words into `scan`.
    pub fn scan_page(&self, page_num: u32, words: &[WordRecord], scan: &mut DocumentScan) {
        for word in words {
            let text = word.text.trim();
            if text.is_empty() || text.chars().count() > MAX_TOKEN_CHARS {
                continue;
            }

            scan.font_stat.add_size(word.size);
            scan.tokens.push(Token {
                text: text.to_string(),
                size: word.size,
                fontname: word.fontname.clone(),
                indent: word.x0,
            });

            let candidate = HeadingCandidate::new(text, word.size, &word.fontname, word.x0);
            let Some(level) = classify(&candidate) else {
                continue;
            };

            let cleaned = self.normalizer.normalize(text);
            if cleaned.is_empty() {
                continue;
            }

            if scan
                .headings
                .insert(HeadingEntry::new(level, cleaned.as_str(), page_num))
            {
                log::debug!(
                    "Page {}: heading {:?} ({}, size {}, font {})",
                    page_num,
                    cleaned,
                    level,
                    word.size,
                    word.fontname
                );
            }
        }
    }

    /// Run the fallback cascade on a scan that found nothing.
    fn apply_fallbacks(&self, scan: &mut DocumentScan) -> ScanStage {
        self.largest_font_fallback(scan);
        if !scan.headings.is_empty() {
            return ScanStage::LargestFont;
        }

        self.numbered_fallback(scan);
        if !scan.headings.is_empty() {
            return ScanStage::NumberedPattern;
        }

        ScanStage::Empty
    }

    /// Promote tokens set in one of the largest sizes, by size rank.
    fn largest_font_fallback(&self, scan: &mut DocumentScan) {
        if scan.font_stat.is_empty() {
            return;
        }
        let ranks = scan.font_stat.top_ranks(FALLBACK_SIZE_RANKS);
        log::debug!("Largest font sizes: {:?}", ranks.sizes());

        for token in &scan.tokens {
            let Some(level) = ranks.rank_of(token.size).and_then(HeadingLevel::from_rank) else {
                continue;
            };

            let len = token.text.chars().count();
            if len <= FALLBACK_MIN_CHARS || len >= FALLBACK_MAX_CHARS {
                continue;
            }
            if STOP_WORDS.contains(&token.text.to_lowercase().as_str()) {
                continue;
            }

            let cleaned = self.normalizer.normalize(&token.text);
            if !cleaned.is_empty() {
                scan.headings
                    .insert(HeadingEntry::new(level, cleaned, FALLBACK_PAGE));
            }
        }
    }

    /// Promote tokens with a numbered prefix to H2.
    fn numbered_fallback(&self, scan: &mut DocumentScan) {
        for token in &scan.tokens {
            if token.text.chars().count() >= FALLBACK_MAX_CHARS
                || !NUMBERED_PREFIX.is_match(&token.text)
            {
                continue;
            }

            let cleaned = self.normalizer.normalize(&token.text);
            if !cleaned.is_empty() {
                scan.headings
                    .insert(HeadingEntry::new(HeadingLevel::H2, cleaned, FALLBACK_PAGE));
            }
        }
    }
}
