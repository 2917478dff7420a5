//! Outline assembly: scan a document and wrap its headings with a title.

use std::path::Path;

use crate::error::Result;
use crate::model::DocumentOutline;
use crate::parser::{LopdfSource, OutlineOptions, OutlineScanner, PageSource};

/// Extract the outline of any page source.
///
/// # Example
///
/// ```
/// use pdfoutline::{extract_outline, MemorySource, OutlineOptions, WordRecord};
///
/// let source = MemorySource::from_words(vec![vec![WordRecord::new(
///     "INTRODUCTION",
///     16.0,
///     "Helvetica-Bold",
///     50.0,
///     72.0,
/// )]]);
/// let outline = extract_outline(&source, &OutlineOptions::default())?;
/// assert_eq!(outline.title, "INTRODUCTION");
/// # Ok::<(), pdfoutline::Error>(())
/// ```
pub fn extract_outline<S: PageSource + ?Sized>(
    source: &S,
    options: &OutlineOptions,
) -> Result<DocumentOutline> {
    let outcome = OutlineScanner::new(source, options).scan_with_stage()?;
    log::debug!("Outline built by {:?} pass", outcome.stage);

    Ok(DocumentOutline::from_headings(outcome.headings))
}

/// Extract the outline of a PDF file.
pub fn extract_outline_file<P: AsRef<Path>>(
    path: P,
    options: &OutlineOptions,
) -> Result<DocumentOutline> {
    let path = path.as_ref();
    let source = LopdfSource::open(path)?;
    log::info!(
        "Processing {} (PDF {}, {} pages)",
        path.display(),
        source.version(),
        source.page_count()
    );

    extract_outline(&source, options)
}

/// Extract the outline of a PDF held in memory.
pub fn extract_outline_bytes(data: &[u8], options: &OutlineOptions) -> Result<DocumentOutline> {
    let source = LopdfSource::from_bytes(data)?;
    extract_outline(&source, options)
}
