//! Word reconstruction from glyph-level records.
//!
//! Some PDFs position every character individually, and the word-level
//! extraction then degenerates into one record per glyph. Those pages are
//! re-read in glyph mode, grouped into lines, and folded back into words
//! here.

use std::collections::BTreeMap;

use crate::model::WordRecord;

/// Characters that end a word in addition to whitespace.
pub const WORD_SEPARATORS: &[char] = &[',', '.', '!', '?', ';', ':'];

/// Number of leading records sampled by [`looks_glyph_granular`].
pub const GLYPH_SAMPLE: usize = 10;

/// Check whether a page's word records are really individual glyphs.
///
/// Samples the first [`GLYPH_SAMPLE`] records; a single-character record
/// among them marks the page as glyph-granular.
pub fn looks_glyph_granular(words: &[WordRecord]) -> bool {
    words
        .iter()
        .take(GLYPH_SAMPLE)
        .any(WordRecord::is_single_char)
}

/// Group glyphs into lines keyed by `y0` rounded to one decimal place.
///
/// Lines come back top to bottom; glyphs within a line are sorted by `x0`,
/// keeping extraction order for equal offsets.
pub fn group_into_lines(glyphs: Vec<WordRecord>) -> Vec<Vec<WordRecord>> {
    let mut lines: BTreeMap<i64, Vec<WordRecord>> = BTreeMap::new();
    for glyph in glyphs {
        let key = (f64::from(glyph.y0) * 10.0).round() as i64;
        lines.entry(key).or_default().push(glyph);
    }

    lines
        .into_values()
        .map(|mut line| {
            line.sort_by(|a, b| a.x0.partial_cmp(&b.x0).unwrap_or(std::cmp::Ordering::Equal));
            line
        })
        .collect()
}

/// Fold one line of glyphs into words.
///
/// Each maximal run of non-separator glyphs becomes a word whose size,
/// font and position come from the run's first glyph.
pub fn reconstruct_words(line: &[WordRecord]) -> Vec<WordRecord> {
    let mut words = Vec::new();
    let mut current: Option<WordRecord> = None;

    for glyph in line {
        if is_separator(&glyph.text) {
            if let Some(word) = current.take() {
                words.push(word);
            }
            continue;
        }

        match current.as_mut() {
            Some(word) => word.text.push_str(&glyph.text),
            None => current = Some(glyph.clone()),
        }
    }

    if let Some(word) = current {
        words.push(word);
    }

    words
}

/// Group glyphs into lines and rebuild every line's words, top to bottom.
pub fn reconstruct_page(glyphs: Vec<WordRecord>) -> Vec<WordRecord> {
    group_into_lines(glyphs)
        .iter()
        .flat_map(|line| reconstruct_words(line))
        .collect()
}

fn is_separator(text: &str) -> bool {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (None, _) => true,
        (Some(c), None) => c.is_whitespace() || WORD_SEPARATORS.contains(&c),
        _ => text.trim().is_empty(),
    }
}
