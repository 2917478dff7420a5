//! Heading classification.
//!
//! A decision table over glyph size, font weight, indentation and a few
//! textual patterns. Sizes are split into three exclusive bands, one per
//! heading level; the first band whose conditions hold wins.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::HeadingLevel;

/// H1 requires a size strictly above this.
pub const H1_MIN_SIZE: f32 = 14.0;
/// H2 requires a size strictly above this (and at most [`H1_MIN_SIZE`]).
pub const H2_MIN_SIZE: f32 = 12.0;
/// H3 requires a size strictly above this (and at most [`H2_MIN_SIZE`]).
pub const H3_MIN_SIZE: f32 = 10.0;
/// H1 requires an indent strictly below this.
pub const H1_MAX_INDENT: f32 = 100.0;
/// An indent strictly below this qualifies an H3 on its own.
pub const H3_MAX_INDENT: f32 = 80.0;
/// Trimmed text shorter than this is never a heading.
pub const MIN_HEADING_CHARS: usize = 2;

/// "1 ", "1. ", "2.3.1 " prefixes.
pub static NUMBERED_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[0-9]+\.?)+\s+").expect("valid numbered prefix regex"));

static ALL_CAPS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][A-Z\s]{3,}$").expect("valid all caps regex"));

static TITLE_CASE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*$").expect("valid title case regex")
});

/// Layout attributes of one token, as seen by the classifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadingCandidate<'a> {
    /// Token text
    pub text: &'a str,
    /// Glyph size in points
    pub size: f32,
    /// Font name
    pub fontname: &'a str,
    /// Horizontal offset from the page's left edge
    pub indent: f32,
}

impl<'a> HeadingCandidate<'a> {
    /// Create a new candidate.
    pub fn new(text: &'a str, size: f32, fontname: &'a str, indent: f32) -> Self {
        Self {
            text,
            size,
            fontname,
            indent,
        }
    }
}

/// Classify a token. Returns `None` when it is not a heading.
pub fn classify(candidate: &HeadingCandidate<'_>) -> Option<HeadingLevel> {
    let text = candidate.text.trim();
    if text.chars().count() < MIN_HEADING_CHARS {
        return None;
    }

    let size = candidate.size;
    let bold = is_bold(candidate.fontname);

    if size > H1_MIN_SIZE {
        return ((bold || is_uppercase(text)) && candidate.indent < H1_MAX_INDENT)
            .then_some(HeadingLevel::H1);
    }

    if size > H2_MIN_SIZE {
        return (bold || matches_heading_pattern(text)).then_some(HeadingLevel::H2);
    }

    if size > H3_MIN_SIZE {
        return (bold || candidate.indent < H3_MAX_INDENT || matches_heading_pattern(text))
            .then_some(HeadingLevel::H3);
    }

    None
}

/// Whether a font name denotes a bold weight.
pub fn is_bold(fontname: &str) -> bool {
    fontname.to_lowercase().contains("bold")
}

/// At least one cased letter, and no lowercase letters.
pub fn is_uppercase(text: &str) -> bool {
    let mut cased = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            cased = true;
        }
    }
    cased
}

/// Numbered prefix, all-caps run, or Title Case words.
pub fn matches_heading_pattern(text: &str) -> bool {
    NUMBERED_PREFIX.is_match(text) || ALL_CAPS.is_match(text) || TITLE_CASE.is_match(text)
}
