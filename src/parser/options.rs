//! Outline extraction options.

use crate::normalize::PhraseTable;
use crate::render::JsonFormat;

use super::backend::GlyphMode;

/// Runtime knobs for a scan. Heuristic thresholds such as
/// [`H1_MIN_SIZE`](crate::parser::H1_MIN_SIZE) are constants, not options.
#[derive(Debug, Clone)]
pub struct OutlineOptions {
    /// What a page that fails to decode does to its document
    pub error_mode: ErrorMode,

    /// Settings handed to the page source for character-level extraction
    pub glyph_mode: GlyphMode,

    /// Literal phrase repairs applied to heading text
    pub phrases: PhraseTable,

    /// Layout of the JSON written for each document
    pub json_format: JsonFormat,
}

impl OutlineOptions {
    /// Options with the corpus phrase table and pretty JSON.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how page decoding failures are handled.
    pub fn with_error_mode(mut self, error_mode: ErrorMode) -> Self {
        self.error_mode = error_mode;
        self
    }

    /// Shorthand for `with_error_mode(ErrorMode::Lenient)`.
    pub fn lenient(self) -> Self {
        self.with_error_mode(ErrorMode::Lenient)
    }

    /// Set the character-level extraction settings.
    pub fn with_glyph_mode(mut self, glyph_mode: GlyphMode) -> Self {
        self.glyph_mode = glyph_mode;
        self
    }

    /// Replace the phrase table.
    pub fn with_phrases(mut self, phrases: PhraseTable) -> Self {
        self.phrases = phrases;
        self
    }

    /// Keep only the generic case-boundary repair.
    pub fn without_phrases(self) -> Self {
        self.with_phrases(PhraseTable::empty())
    }

    /// Set the JSON layout.
    pub fn with_json_format(mut self, json_format: JsonFormat) -> Self {
        self.json_format = json_format;
        self
    }
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::default(),
            glyph_mode: GlyphMode::default(),
            phrases: PhraseTable::corpus(),
            json_format: JsonFormat::default(),
        }
    }
}

/// How page decoding failures are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// A failing page fails the whole document
    #[default]
    Strict,
    /// A failing page is logged and contributes no words
    Lenient,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let options = OutlineOptions::new()
            .lenient()
            .without_phrases()
            .with_json_format(JsonFormat::Compact);

        assert_eq!(options.error_mode, ErrorMode::Lenient);
        assert!(options.phrases.is_empty());
        assert_eq!(options.json_format, JsonFormat::Compact);
    }

    #[test]
    fn test_defaults_match_batch_behaviour() {
        let options = OutlineOptions::default();
        assert_eq!(options.error_mode, ErrorMode::Strict);
        assert_eq!(options.json_format, JsonFormat::Pretty);
        assert!(options.glyph_mode.keep_blank_chars);
        assert_eq!(options.phrases, PhraseTable::corpus());
    }

    #[test]
    fn test_custom_glyph_mode() {
        let mode = GlyphMode {
            x_tolerance: 1.5,
            ..GlyphMode::default()
        };
        let options = OutlineOptions::new().with_glyph_mode(mode);
        assert_eq!(options.glyph_mode.x_tolerance, 1.5);
    }
}
