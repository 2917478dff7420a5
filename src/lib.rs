//! # pdfoutline
//!
//! Heading outline extraction for PDF documents.
//!
//! Each page's positioned text is classified into H1/H2/H3 headings from
//! font size, boldness, indentation and casing. Documents whose text comes
//! out one character at a time are rebuilt into words first, and documents
//! with no clear headings fall back to font-size ranking and numbered
//! prefixes. The result is a title plus an ordered outline, serialized as
//! JSON.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfoutline::{extract_outline_file, to_json, JsonFormat, OutlineOptions};
//!
//! fn main() -> pdfoutline::Result<()> {
//!     let outline = extract_outline_file("document.pdf", &OutlineOptions::default())?;
//!     println!("{}", to_json(&outline, JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Batch mode
//!
//! ```no_run
//! use std::path::Path;
//! use pdfoutline::{batch, OutlineOptions};
//!
//! let report = batch::process_directory(
//!     Path::new("./input"),
//!     Path::new("./output"),
//!     &OutlineOptions::default(),
//! )?;
//! println!("{} outlines written", report.written.len());
//! # Ok::<(), pdfoutline::Error>(())
//! ```

pub mod batch;
pub mod detect;
pub mod error;
pub mod model;
pub mod normalize;
pub mod outline;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use batch::{process_directory, BatchReport};
pub use error::{Error, Result};
pub use model::{DocumentOutline, HeadingEntry, HeadingLevel, WordRecord, DEFAULT_TITLE};
pub use normalize::{PhraseTable, TextNormalizer};
pub use outline::{extract_outline, extract_outline_bytes, extract_outline_file};
pub use parser::{
    ErrorMode, GlyphMode, LopdfSource, MemoryPage, MemorySource, OutlineOptions, PageSource,
};
pub use render::{to_json, JsonFormat};

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Edge Case Tests ====================

    #[test]
    fn test_extract_outline_bytes_empty_data() {
        let data: [u8; 0] = [];
        let result = extract_outline_bytes(&data, &OutlineOptions::default());
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_extract_outline_bytes_too_short() {
        let result = extract_outline_bytes(b"%PDF", &OutlineOptions::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_extract_outline_bytes_bad_version() {
        let result = extract_outline_bytes(b"%PDF-x.y\n", &OutlineOptions::default());
        assert!(matches!(result, Err(Error::UnsupportedVersion(_))));
    }

    #[test]
    fn test_extract_outline_file_missing() {
        let result = extract_outline_file("does/not/exist.pdf", &OutlineOptions::default());
        assert!(matches!(result, Err(Error::Io(_))));
    }

    // ==================== Pipeline Tests ====================

    #[test]
    fn test_memory_source_to_json() {
        let source = MemorySource::from_words(vec![vec![
            WordRecord::new("OVERVIEW", 15.0, "Times-Bold", 40.0, 60.0),
            WordRecord::new("plain", 10.0, "Times-Roman", 40.0, 80.0),
        ]]);
        let outline = extract_outline(&source, &OutlineOptions::default()).unwrap();
        let json = to_json(&outline, JsonFormat::Compact).unwrap();

        assert_eq!(
            json,
            r#"{"title":"OVERVIEW","outline":[{"level":"H1","text":"OVERVIEW","page":1}]}"#
        );
    }

    #[test]
    fn test_lenient_mode_skips_failed_pages() {
        struct FlakySource;

        impl PageSource for FlakySource {
            fn page_count(&self) -> u32 {
                2
            }

            fn words(&self, page: u32) -> Result<Vec<WordRecord>> {
                if page == 1 {
                    return Err(Error::TextExtract("bad stream".to_string()));
                }
                Ok(vec![WordRecord::new("Methods", 13.0, "Arial-Bold", 50.0, 70.0)])
            }

            fn glyphs(&self, page: u32, _mode: &GlyphMode) -> Result<Vec<WordRecord>> {
                self.words(page)
            }
        }

        let strict = extract_outline(&FlakySource, &OutlineOptions::default());
        assert!(matches!(strict, Err(Error::TextExtract(_))));

        let lenient = extract_outline(&FlakySource, &OutlineOptions::new().lenient()).unwrap();
        assert_eq!(lenient.outline.len(), 1);
        assert_eq!(lenient.outline[0].page, 2);
        assert_eq!(lenient.title, "Methods");
    }
}
