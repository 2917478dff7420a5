//! Word and glyph records produced by a page source.

use serde::{Deserialize, Serialize};

/// A token extracted from a page, with the layout attributes heading
/// detection works from.
///
/// The same type carries single-glyph records when a page is read in
/// character mode; the word reconstructor folds those back into words.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordRecord {
    /// Token text
    pub text: String,
    /// Nominal glyph height in points
    pub size: f32,
    /// Font name (e.g., "Arial-Bold")
    #[serde(default)]
    pub fontname: String,
    /// Left offset in page units
    #[serde(default)]
    pub x0: f32,
    /// Offset from the top of the page in page units
    #[serde(default)]
    pub y0: f32,
}

impl WordRecord {
    /// Create a new record.
    pub fn new(
        text: impl Into<String>,
        size: f32,
        fontname: impl Into<String>,
        x0: f32,
        y0: f32,
    ) -> Self {
        Self {
            text: text.into(),
            size,
            fontname: fontname.into(),
            x0,
            y0,
        }
    }

    /// Whether the record holds exactly one character.
    pub fn is_single_char(&self) -> bool {
        let mut chars = self.text.chars();
        chars.next().is_some() && chars.next().is_none()
    }
}
