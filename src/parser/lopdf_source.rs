//! [`PageSource`] backed by lopdf.
//!
//! Walks each page's content stream with a text matrix, decodes shown
//! strings through the font's encoding, and places every character on the
//! page through the text matrix and the current transformation matrix.
//! Glyph widths are estimated, not read from the font program.

use std::collections::BTreeMap;
use std::path::Path;

use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};
use unicode_normalization::UnicodeNormalization;

use crate::detect::{pdf_version, pdf_version_from_path};
use crate::error::{Error, Result};
use crate::model::WordRecord;

use super::backend::{GlyphMode, PageSource};

/// Estimated glyph advance, as a fraction of the font size.
const CHAR_WIDTH_EM: f32 = 0.5;
/// TJ adjustments beyond this (thousandths of an em) are word breaks.
const TJ_SPACE_THRESHOLD: f32 = 200.0;
/// Letter-size page height, used when a page has no MediaBox.
const DEFAULT_PAGE_HEIGHT: f32 = 792.0;
/// Bound on `/Parent` hops, so a cyclic page tree cannot hang the scan.
const MAX_TREE_DEPTH: usize = 32;

const IDENTITY: [f32; 6] = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];

/// A character placed on the page.
#[derive(Debug, Clone)]
struct PlacedChar {
    ch: char,
    x: f32,
    /// Baseline, PDF user space (bottom-up)
    y: f32,
    size: f32,
    font: String,
}

/// A PDF document opened for outline extraction.
pub struct LopdfSource {
    doc: LopdfDocument,
    pages: BTreeMap<u32, ObjectId>,
}

impl LopdfSource {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        pdf_version_from_path(path)?;

        let doc = LopdfDocument::load(path)?;
        Self::from_document(doc)
    }

    /// Open a PDF held in memory.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        pdf_version(data)?;

        let doc = LopdfDocument::load_mem(data)?;
        Self::from_document(doc)
    }

    fn from_document(doc: LopdfDocument) -> Result<Self> {
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }
        let pages = doc.get_pages();
        Ok(Self { doc, pages })
    }

    /// PDF version from the document header.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }

    fn page_id(&self, page: u32) -> Result<ObjectId> {
        self.pages
            .get(&page)
            .copied()
            .ok_or(Error::PageOutOfRange(page, self.page_count()))
    }

    /// Page height from the MediaBox, inherited through the page tree.
    fn page_height(&self, page_id: ObjectId) -> f32 {
        let mut dict = self.doc.get_dictionary(page_id).ok();
        for _ in 0..MAX_TREE_DEPTH {
            let Some(current) = dict else { break };
            if let Some(height) = media_box_height(&self.doc, current) {
                return height;
            }
            dict = current
                .get(b"Parent")
                .and_then(Object::as_reference)
                .and_then(|parent| self.doc.get_dictionary(parent))
                .ok();
        }
        DEFAULT_PAGE_HEIGHT
    }

    /// Place every shown character of a page, in content stream order.
    fn placed_chars(&self, page: u32) -> Result<(Vec<PlacedChar>, f32)> {
        let page_id = self.page_id(page)?;
        let height = self.page_height(page_id);

        let fonts = self.doc.get_page_fonts(page_id)?;
        let content = self
            .doc
            .get_page_content(page_id)
            .map_err(|e| Error::TextExtract(format!("Page {}: {}", page, e)))?;
        let content = lopdf::content::Content::decode(&content)
            .map_err(|e| Error::TextExtract(format!("Page {}: {}", page, e)))?;

        let mut chars = Vec::new();
        let mut ctm = IDENTITY;
        let mut saved_ctm: Vec<[f32; 6]> = Vec::new();
        let mut matrix = TextMatrix::default();
        let mut in_text_block = false;
        let mut font_size: f32 = 12.0;
        let mut font_name = String::new();
        let mut encoding = None;

        for op in &content.operations {
            let operands = &op.operands;
            let shown: Vec<Shown<'_>> = match op.operator.as_str() {
                "q" => {
                    saved_ctm.push(ctm);
                    continue;
                }
                "Q" => {
                    // Unbalanced Q leaves the transform as it is.
                    if let Some(restored) = saved_ctm.pop() {
                        ctm = restored;
                    }
                    continue;
                }
                "cm" => {
                    if let Some(m) = six_numbers(operands) {
                        ctm = multiply(&m, &ctm);
                    }
                    continue;
                }
                "BT" => {
                    in_text_block = true;
                    matrix = TextMatrix::default();
                    continue;
                }
                "ET" => {
                    in_text_block = false;
                    continue;
                }
                "Tf" => {
                    if let [Object::Name(name), size, ..] = operands.as_slice() {
                        let dict = fonts.get(name);
                        font_name = dict
                            .and_then(|d| base_font(d))
                            .unwrap_or_else(|| String::from_utf8_lossy(name).into_owned());
                        encoding = dict.and_then(|d| d.get_font_encoding(&self.doc).ok());
                        font_size = get_number(size).unwrap_or(12.0);
                    }
                    continue;
                }
                "TL" => {
                    if let Some(leading) = operands.first().and_then(get_number) {
                        matrix.leading = leading;
                    }
                    continue;
                }
                "Td" | "TD" => {
                    if let [tx, ty, ..] = operands.as_slice() {
                        let tx = get_number(tx).unwrap_or(0.0);
                        let ty = get_number(ty).unwrap_or(0.0);
                        if op.operator == "TD" {
                            matrix.leading = -ty;
                        }
                        matrix.move_line(tx, ty);
                    }
                    continue;
                }
                "Tm" => {
                    if let Some(m) = six_numbers(operands) {
                        matrix.set(m);
                    }
                    continue;
                }
                "T*" => {
                    matrix.next_line();
                    continue;
                }
                "Tj" => operands.first().map(shown_string).into_iter().flatten().collect(),
                "TJ" => match operands.first() {
                    Some(Object::Array(items)) => items.iter().filter_map(shown_item).collect(),
                    _ => Vec::new(),
                },
                "'" => {
                    matrix.next_line();
                    operands.first().map(shown_string).into_iter().flatten().collect()
                }
                "\"" => {
                    matrix.next_line();
                    operands.get(2).map(shown_string).into_iter().flatten().collect()
                }
                _ => continue,
            };

            if !in_text_block {
                continue;
            }

            let size = font_size * matrix.scale(&ctm);
            for item in shown {
                match item {
                    Shown::Text(bytes) => {
                        let decoded = match &encoding {
                            Some(enc) => LopdfDocument::decode_text(enc, bytes)
                                .unwrap_or_else(|_| decode_text_simple(bytes)),
                            None => decode_text_simple(bytes),
                        };
                        for ch in decoded.nfc() {
                            let (x, y) = matrix.position(&ctm);
                            chars.push(PlacedChar {
                                ch,
                                x,
                                y,
                                size,
                                font: font_name.clone(),
                            });
                            matrix.advance(font_size * CHAR_WIDTH_EM);
                        }
                    }
                    Shown::Adjust(adjustment) => {
                        // Negative adjustments move the next glyph right.
                        if -adjustment > TJ_SPACE_THRESHOLD
                            && chars.last().is_some_and(|c: &PlacedChar| !c.ch.is_whitespace())
                        {
                            let (x, y) = matrix.position(&ctm);
                            chars.push(PlacedChar {
                                ch: ' ',
                                x,
                                y,
                                size,
                                font: font_name.clone(),
                            });
                        }
                        matrix.advance(-adjustment / 1000.0 * font_size);
                    }
                }
            }
        }

        Ok((chars, height))
    }

    /// Snap baselines within `y_tolerance` onto the previous character's
    /// line and insert a blank where a same-line gap exceeds `x_tolerance`.
    fn align(chars: Vec<PlacedChar>, mode: &GlyphMode) -> Vec<PlacedChar> {
        let mut aligned: Vec<PlacedChar> = Vec::with_capacity(chars.len());

        for mut c in chars {
            if let Some(prev) = aligned.last() {
                if (c.y - prev.y).abs() <= mode.y_tolerance {
                    c.y = prev.y;
                    let prev_end = prev.x + prev.size * CHAR_WIDTH_EM;
                    if c.x - prev_end > mode.x_tolerance
                        && !prev.ch.is_whitespace()
                        && !c.ch.is_whitespace()
                    {
                        let blank = PlacedChar {
                            ch: ' ',
                            x: prev_end,
                            ..prev.clone()
                        };
                        aligned.push(blank);
                    }
                } else if !prev.ch.is_whitespace() {
                    // A line change always ends the current word.
                    let blank = PlacedChar {
                        ch: ' ',
                        x: prev.x + prev.size * CHAR_WIDTH_EM,
                        ..prev.clone()
                    };
                    aligned.push(blank);
                }
            }
            aligned.push(c);
        }

        aligned
    }
}

impl PageSource for LopdfSource {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn words(&self, page: u32) -> Result<Vec<WordRecord>> {
        let (chars, height) = self.placed_chars(page)?;
        let chars = Self::align(chars, &GlyphMode::default());

        let mut words = Vec::new();
        let mut current: Option<WordRecord> = None;
        for c in chars {
            if c.ch.is_whitespace() {
                words.extend(current.take());
                continue;
            }
            match current.as_mut() {
                Some(word) => word.text.push(c.ch),
                None => {
                    current = Some(WordRecord::new(c.ch.to_string(), c.size, c.font, c.x, height - c.y))
                }
            }
        }
        words.extend(current);

        Ok(words)
    }

    fn glyphs(&self, page: u32, mode: &GlyphMode) -> Result<Vec<WordRecord>> {
        let (chars, height) = self.placed_chars(page)?;
        Ok(Self::align(chars, mode)
            .into_iter()
            .filter(|c| mode.keep_blank_chars || !c.ch.is_whitespace())
            .map(|c| WordRecord::new(c.ch.to_string(), c.size, c.font, c.x, height - c.y))
            .collect())
    }
}

/// Operand of a text-showing operator.
enum Shown<'a> {
    Text(&'a [u8]),
    Adjust(f32),
}

fn shown_string(obj: &Object) -> Option<Shown<'_>> {
    match obj {
        Object::String(bytes, _) => Some(Shown::Text(bytes)),
        _ => None,
    }
}

fn shown_item(obj: &Object) -> Option<Shown<'_>> {
    match obj {
        Object::String(bytes, _) => Some(Shown::Text(bytes)),
        other => get_number(other).map(Shown::Adjust),
    }
}

fn base_font(font: &Dictionary) -> Option<String> {
    font.get(b"BaseFont")
        .and_then(Object::as_name)
        .ok()
        .map(|n| String::from_utf8_lossy(n).into_owned())
}

fn media_box_height(doc: &LopdfDocument, dict: &Dictionary) -> Option<f32> {
    let media_box = match dict.get(b"MediaBox").ok()? {
        Object::Reference(r) => doc.get_object(*r).ok()?,
        other => other,
    };
    match media_box.as_array().ok()?.as_slice() {
        [_, lly, _, ury, ..] => Some(get_number(ury)? - get_number(lly)?),
        _ => None,
    }
}

/// `m1 × m2` for PDF matrices written as `[a b c d e f]`.
fn multiply(m1: &[f32; 6], m2: &[f32; 6]) -> [f32; 6] {
    let [a1, b1, c1, d1, e1, f1] = *m1;
    let [a2, b2, c2, d2, e2, f2] = *m2;
    [
        a1 * a2 + b1 * c2,
        a1 * b2 + b1 * d2,
        c1 * a2 + d1 * c2,
        c1 * b2 + d1 * d2,
        e1 * a2 + f1 * c2 + e2,
        e1 * b2 + f1 * d2 + f2,
    ]
}

fn six_numbers(operands: &[Object]) -> Option<[f32; 6]> {
    match operands {
        [a, b, c, d, e, f, ..] => Some([
            get_number(a)?,
            get_number(b)?,
            get_number(c)?,
            get_number(d)?,
            get_number(e)?,
            get_number(f)?,
        ]),
        _ => None,
    }
}

/// Text and line matrices of a text object.
#[derive(Debug, Clone)]
struct TextMatrix {
    text: [f32; 6],
    line: [f32; 6],
    leading: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            text: IDENTITY,
            line: IDENTITY,
            leading: 0.0,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, m: [f32; 6]) {
        self.line = m;
        self.text = m;
    }

    fn move_line(&mut self, tx: f32, ty: f32) {
        let [a, b, c, d, e, f] = self.line;
        self.line = [a, b, c, d, e + tx * a + ty * c, f + tx * b + ty * d];
        self.text = self.line;
    }

    fn next_line(&mut self) {
        self.move_line(0.0, -self.leading);
    }

    fn advance(&mut self, tx: f32) {
        self.text[4] += tx * self.text[0];
        self.text[5] += tx * self.text[1];
    }

    /// Glyph origin in user space.
    fn position(&self, ctm: &[f32; 6]) -> (f32, f32) {
        let m = multiply(&self.text, ctm);
        (m[4], m[5])
    }

    /// Vertical scale from text space to user space, applied to the font size.
    fn scale(&self, ctm: &[f32; 6]) -> f32 {
        let [_, _, c, d, _, _] = multiply(&self.text, ctm);
        (c * c + d * d).sqrt()
    }
}

/// Helper to extract number from PDF object.
fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Simple text decoding fallback when no encoding is available.
fn decode_text_simple(bytes: &[u8]) -> String {
    // Try UTF-16BE first (BOM marker)
    if let Some(payload) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let utf16: Vec<u16> = payload
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    // Try UTF-8
    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    // Fallback: Latin-1
    bytes.iter().map(|&b| b as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placed(ch: char, x: f32, y: f32) -> PlacedChar {
        PlacedChar {
            ch,
            x,
            y,
            size: 10.0,
            font: "Helvetica".to_string(),
        }
    }

    #[test]
    fn test_decode_text_simple() {
        assert_eq!(decode_text_simple(b"Hello"), "Hello");
        assert_eq!(decode_text_simple(&[0x48, 0x65, 0x6C, 0x6C, 0xE9]), "Hellé");
        assert_eq!(decode_text_simple(&[0xFE, 0xFF, 0x00, 0x48, 0x00, 0x69]), "Hi");
    }

    #[test]
    fn test_text_matrix_moves() {
        let mut m = TextMatrix::default();
        m.move_line(72.0, 700.0);
        assert_eq!(m.position(&IDENTITY), (72.0, 700.0));

        m.advance(30.0);
        assert_eq!(m.position(&IDENTITY), (102.0, 700.0));

        m.leading = 14.0;
        m.next_line();
        assert_eq!(m.position(&IDENTITY), (72.0, 686.0));
    }

    #[test]
    fn test_text_matrix_scale() {
        let mut m = TextMatrix::default();
        m.set([2.0, 0.0, 0.0, 2.0, 0.0, 0.0]);
        assert_eq!(m.scale(&IDENTITY), 2.0);
    }

    #[test]
    fn test_flipped_page_transform() {
        // Top-down user space at 75%, as written by browser print engines.
        let ctm = [0.75, 0.0, 0.0, -0.75, 0.0, 792.0];
        let mut m = TextMatrix::default();
        m.set([1.0, 0.0, 0.0, -1.0, 60.0, 40.0]);

        assert_eq!(m.position(&ctm), (45.0, 762.0));
        assert_eq!(m.scale(&ctm), 0.75);
    }

    #[test]
    fn test_multiply_applies_left_then_right() {
        let scale = [2.0, 0.0, 0.0, 2.0, 0.0, 0.0];
        let shift = [1.0, 0.0, 0.0, 1.0, 10.0, 20.0];
        assert_eq!(multiply(&shift, &scale), [2.0, 0.0, 0.0, 2.0, 20.0, 40.0]);
        assert_eq!(multiply(&scale, &shift), [2.0, 0.0, 0.0, 2.0, 10.0, 20.0]);
    }

    #[test]
    fn test_align_inserts_gap_blank() {
        let chars = vec![placed('a', 0.0, 100.0), placed('b', 20.0, 100.5)];
        let aligned = LopdfSource::align(chars, &GlyphMode::default());
        let text: String = aligned.iter().map(|c| c.ch).collect();
        assert_eq!(text, "a b");
        assert_eq!(aligned[2].y, 100.0);
    }

    #[test]
    fn test_align_keeps_adjacent_chars() {
        let chars = vec![placed('a', 0.0, 100.0), placed('b', 5.0, 100.0)];
        let aligned = LopdfSource::align(chars, &GlyphMode::default());
        assert_eq!(aligned.len(), 2);
    }

    #[test]
    fn test_align_breaks_on_line_change() {
        let chars = vec![placed('a', 0.0, 100.0), placed('b', 5.0, 80.0)];
        let aligned = LopdfSource::align(chars, &GlyphMode::default());
        let text: String = aligned.iter().map(|c| c.ch).collect();
        assert_eq!(text, "a b");
    }

    #[test]
    fn test_from_bytes_rejects_non_pdf() {
        assert!(matches!(
            LopdfSource::from_bytes(b"not a pdf"),
            Err(Error::UnknownFormat)
        ));
    }
}
