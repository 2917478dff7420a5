//! Outline types: heading levels, heading entries and the per-document
//! outline written as JSON.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Title used when a document yields no headings at all.
pub const DEFAULT_TITLE: &str = "Document Outline";

/// Heading level, from most to least important.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Level for a size rank (0 = largest) in the largest-font fallback.
    pub fn from_rank(rank: usize) -> Option<Self> {
        match rank {
            0 => Some(Self::H1),
            1 => Some(Self::H2),
            2 => Some(Self::H3),
            _ => None,
        }
    }

    /// Label as written in the output ("H1", "H2", "H3").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::H1 => "H1",
            Self::H2 => "H2",
            Self::H3 => "H3",
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A detected heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingEntry {
    /// Heading level
    pub level: HeadingLevel,
    /// Normalized heading text (never empty)
    pub text: String,
    /// Page number (1-indexed)
    pub page: u32,
}

impl HeadingEntry {
    /// Create a new heading entry.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }

    /// Deduplication key: lower-cased text plus level.
    pub fn key(&self) -> (String, HeadingLevel) {
        (self.text.to_lowercase(), self.level)
    }
}

/// The outline of one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentOutline {
    /// Document title
    pub title: String,
    /// Headings in the order they were first encountered
    pub outline: Vec<HeadingEntry>,
}

impl DocumentOutline {
    /// Build an outline from headings, choosing the title.
    pub fn from_headings(headings: Vec<HeadingEntry>) -> Self {
        Self {
            title: Self::title_for(&headings),
            outline: headings,
        }
    }

    /// The first H1 heading, else the first heading, else [`DEFAULT_TITLE`].
    pub fn title_for(headings: &[HeadingEntry]) -> String {
        headings
            .iter()
            .find(|h| h.level == HeadingLevel::H1)
            .or_else(|| headings.first())
            .map(|h| h.text.clone())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string())
    }

    /// Number of headings.
    pub fn len(&self) -> usize {
        self.outline.len()
    }

    /// Whether no heading was found.
    pub fn is_empty(&self) -> bool {
        self.outline.is_empty()
    }
}

impl Default for DocumentOutline {
    fn default() -> Self {
        Self::from_headings(Vec::new())
    }
}
