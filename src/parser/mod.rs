//! Page scanning and heading detection.

mod backend;
mod classify;
mod lopdf_source;
mod options;
mod reconstruct;
mod scanner;

pub use backend::{GlyphMode, MemoryPage, MemorySource, PageSource};
pub use classify::{
    classify, is_bold, is_uppercase, matches_heading_pattern, HeadingCandidate, H1_MAX_INDENT,
    H1_MIN_SIZE, H2_MIN_SIZE, H3_MAX_INDENT, H3_MIN_SIZE, MIN_HEADING_CHARS, NUMBERED_PREFIX,
};
pub use lopdf_source::LopdfSource;
pub use options::{ErrorMode, OutlineOptions};
pub use reconstruct::{looks_glyph_granular, reconstruct_page, reconstruct_words};
pub use scanner::{
    DocumentScan, FontStat, HeadingSet, OutlineScanner, ScanOutcome, ScanStage, SizeRanks, Token,
    MAX_TOKEN_CHARS, STOP_WORDS,
};
