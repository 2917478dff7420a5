//! PDF header sniffing.
//!
//! Corrupt or mislabelled files are rejected here, before the decoder is
//! asked to load them, so a batch run can report them cheaply.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const VERSION_LEN: usize = 3; // e.g., "1.7"

/// Read the PDF version ("1.4", "2.0", ...) from the start of a file.
pub fn pdf_version_from_path<P: AsRef<Path>>(path: P) -> Result<String> {
    let mut header = Vec::with_capacity(16);
    File::open(path)?.take(16).read_to_end(&mut header)?;
    pdf_version(&header)
}

/// Read the PDF version from the leading bytes of a document.
pub fn pdf_version(data: &[u8]) -> Result<String> {
    let rest = data.strip_prefix(PDF_MAGIC).ok_or(Error::UnknownFormat)?;
    let version = rest.get(..VERSION_LEN).ok_or(Error::UnknownFormat)?;

    match version {
        [major, b'.', minor] if major.is_ascii_digit() && minor.is_ascii_digit() => {
            Ok(String::from_utf8_lossy(version).into_owned())
        }
        _ => Err(Error::UnsupportedVersion(
            String::from_utf8_lossy(version).into_owned(),
        )),
    }
}

/// Whether a file name carries a `.pdf` extension, in any letter case.
pub fn has_pdf_extension(name: &str) -> bool {
    name.to_ascii_lowercase().ends_with(".pdf")
}
