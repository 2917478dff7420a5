//! Model types shared by extraction and output.
//!
//! [`WordRecord`] is what a page source hands to the scanner; the outline
//! types are what gets written out, one [`DocumentOutline`] per PDF.

mod outline;
mod word;

pub use outline::{DocumentOutline, HeadingEntry, HeadingLevel, DEFAULT_TITLE};
pub use word::WordRecord;
