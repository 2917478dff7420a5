//! Synthetic PDF builder shared by the integration tests.

#![allow(dead_code)]

/// A line of text placed on a page.
pub struct Line {
    pub text: &'static str,
    pub size: f32,
    pub bold: bool,
    pub x: f32,
    pub y: f32,
}

impl Line {
    pub fn new(text: &'static str, size: f32, bold: bool, x: f32, y: f32) -> Self {
        Self {
            text,
            size,
            bold,
            x,
            y,
        }
    }
}

/// Build a minimal PDF with one page per entry of `pages`.
pub fn build_pdf(pages: &[Vec<Line>]) -> Vec<u8> {
    let streams: Vec<String> = pages
        .iter()
        .map(|lines| {
            lines
                .iter()
                .map(|line| {
                    let font = if line.bold { "F2" } else { "F1" };
                    format!(
                        "BT /{} {} Tf {} {} Td ({}) Tj ET\n",
                        font, line.size, line.x, line.y, line.text
                    )
                })
                .collect()
        })
        .collect();
    build_pdf_from_streams(&streams)
}

/// Build a minimal PDF whose pages carry the given content streams.
///
/// Objects 3 and 4 are the regular (`/F1`) and bold (`/F2`) Helvetica
/// fonts. Cross reference offsets are computed so the file loads without
/// repair.
pub fn build_pdf_from_streams(streams: &[String]) -> Vec<u8> {
    let mut objects: Vec<String> = Vec::new();

    objects.push("<< /Type /Catalog /Pages 2 0 R >>".to_string());

    let page_ids: Vec<usize> = (0..streams.len()).map(|i| 5 + i * 2).collect();
    let kids: Vec<String> = page_ids.iter().map(|id| format!("{} 0 R", id)).collect();
    objects.push(format!(
        "<< /Type /Pages /Kids [{}] /Count {} >>",
        kids.join(" "),
        streams.len()
    ));

    objects.push(
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_string(),
    );
    objects.push(
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>"
            .to_string(),
    );

    for (stream, page_id) in streams.iter().zip(&page_ids) {
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {} 0 R >>",
            page_id + 1
        ));
        objects.push(format!(
            "<< /Length {} >>\nstream\n{}endstream",
            stream.len(),
            stream
        ));
    }

    let mut out = String::from("%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.push_str(&format!("{} 0 obj\n{}\nendobj\n", i + 1, body));
    }

    let xref_offset = out.len();
    out.push_str(&format!("xref\n0 {}\n", objects.len() + 1));
    out.push_str("0000000000 65535 f \n");
    for offset in offsets {
        out.push_str(&format!("{:010} 00000 n \n", offset));
    }
    out.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref_offset
    ));

    out.into_bytes()
}
