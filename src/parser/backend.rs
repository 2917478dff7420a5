//! Page source abstraction.
//!
//! The outline scanner never touches PDF structures directly. It asks a
//! [`PageSource`] for the word records of each page, and for glyph records
//! when a page turns out to be extracted character by character.

use crate::error::{Error, Result};
use crate::model::WordRecord;

/// Settings for character-level extraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphMode {
    /// Emit records for blank characters as well
    pub keep_blank_chars: bool,
    /// Horizontal distance under which characters count as adjacent
    pub x_tolerance: f32,
    /// Vertical distance under which characters count as on one line
    pub y_tolerance: f32,
}

impl Default for GlyphMode {
    fn default() -> Self {
        Self {
            keep_blank_chars: true,
            x_tolerance: 3.0,
            y_tolerance: 3.0,
        }
    }
}

/// Abstract interface over a decoded document.
///
/// Pages are numbered from 1 and must be requested in order by callers
/// that care about reading order; implementations need not cache.
pub trait PageSource {
    /// Total number of pages.
    fn page_count(&self) -> u32;

    /// Word-level records for a page, in extraction order.
    fn words(&self, page: u32) -> Result<Vec<WordRecord>>;

    /// Character-level records for a page.
    fn glyphs(&self, page: u32, mode: &GlyphMode) -> Result<Vec<WordRecord>>;
}

/// Records of one page held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryPage {
    /// Word-level records
    pub words: Vec<WordRecord>,
    /// Character-level records, if the caller has them
    pub glyphs: Vec<WordRecord>,
}

impl MemoryPage {
    /// A page with word records only.
    pub fn with_words(words: Vec<WordRecord>) -> Self {
        Self {
            words,
            glyphs: Vec::new(),
        }
    }

    /// Attach glyph records.
    pub fn and_glyphs(mut self, glyphs: Vec<WordRecord>) -> Self {
        self.glyphs = glyphs;
        self
    }
}

/// A [`PageSource`] over pre-extracted records.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pages: Vec<MemoryPage>,
}

impl MemorySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source from word records, one vector per page.
    pub fn from_words(pages: Vec<Vec<WordRecord>>) -> Self {
        Self {
            pages: pages.into_iter().map(MemoryPage::with_words).collect(),
        }
    }

    /// Append a page.
    pub fn add_page(&mut self, page: MemoryPage) {
        self.pages.push(page);
    }

    fn page(&self, page: u32) -> Result<&MemoryPage> {
        page.checked_sub(1)
            .and_then(|idx| self.pages.get(idx as usize))
            .ok_or(Error::PageOutOfRange(page, self.page_count()))
    }
}

impl PageSource for MemorySource {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn words(&self, page: u32) -> Result<Vec<WordRecord>> {
        Ok(self.page(page)?.words.clone())
    }

    fn glyphs(&self, page: u32, mode: &GlyphMode) -> Result<Vec<WordRecord>> {
        let glyphs = &self.page(page)?.glyphs;
        Ok(glyphs
            .iter()
            .filter(|g| mode.keep_blank_chars || !g.text.trim().is_empty())
            .cloned()
            .collect())
    }
}
