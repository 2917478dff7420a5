//! Error types for pdfoutline.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pdfoutline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while reading a PDF or writing its outline.
#[derive(Error, Debug)]
pub enum Error {
    /// Reading a PDF or writing an outline failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file does not start with a PDF header.
    #[error("not a PDF: missing %PDF- header")]
    UnknownFormat,

    /// The PDF header carries a version we cannot read.
    #[error("unreadable PDF version '{0}'")]
    UnsupportedVersion(String),

    /// The decoder could not make sense of the PDF structure.
    #[error("malformed PDF: {0}")]
    PdfParse(String),

    /// Encrypted documents are not decoded.
    #[error("encrypted PDFs are not supported")]
    Encrypted,

    /// A page number outside `1..=page_count` was requested.
    #[error("page {0} requested from a {1}-page document")]
    PageOutOfRange(u32, u32),

    /// A page's content stream could not be turned into text records.
    #[error("cannot extract text: {0}")]
    TextExtract(String),

    /// The batch input directory does not exist.
    #[error("Input directory '{}' does not exist", .0.display())]
    InputDirMissing(PathBuf),

    /// An outline could not be serialized.
    #[error("cannot write outline JSON: {0}")]
    Render(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            other => Error::PdfParse(other.to_string()),
        }
    }
}
