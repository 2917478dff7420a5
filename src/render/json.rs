//! JSON rendering for document outlines.

use crate::error::{Error, Result};
use crate::model::DocumentOutline;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with two-space indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert an outline to JSON. Non-ASCII text is written as-is.
pub fn to_json(outline: &DocumentOutline, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(outline),
        JsonFormat::Compact => serde_json::to_string(outline),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HeadingEntry, HeadingLevel};

    fn sample() -> DocumentOutline {
        DocumentOutline::from_headings(vec![
            HeadingEntry::new(HeadingLevel::H1, "Überblick", 1),
            HeadingEntry::new(HeadingLevel::H2, "1. Scope", 2),
        ])
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        let expected = r#"{
  "title": "Überblick",
  "outline": [
    {
      "level": "H1",
      "text": "Überblick",
      "page": 1
    },
    {
      "level": "H2",
      "text": "1. Scope",
      "page": 2
    }
  ]
}"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&DocumentOutline::default(), JsonFormat::Compact).unwrap();
        assert_eq!(json, r#"{"title":"Document Outline","outline":[]}"#);
    }
}
