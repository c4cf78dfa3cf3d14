//! Minimal single-page PDFs for tests.
//!
//! Text is drawn with a simple Type1 font whose encoding maps a few high
//! codes to the Vietnamese glyphs the chapter headings need, so the
//! extracted text contains real `LỜI NÓI ĐẦU` and `Chương` markers.

/// Codes 128.. of the font encoding, in order.
const VIETNAMESE_GLYPHS: &[(char, &str)] = &[
    ('Ờ', "Ohorngrave"),
    ('Ó', "Oacute"),
    ('Đ', "Dcroat"),
    ('Ầ', "Acircumflexgrave"),
    ('ư', "uhorn"),
    ('ơ', "ohorn"),
];

const FIRST_CHAR: usize = 32;
const LAST_CHAR: usize = 255;
const GLYPH_WIDTH: u32 = 500;

/// Encode a line for a PDF string literal in the fixture font.
fn encode_line(line: &str) -> Vec<u8> {
    let mut out = Vec::new();
    for c in line.chars() {
        match c {
            '(' | ')' | '\\' => {
                out.push(b'\\');
                out.push(c as u8);
            }
            ' '..='~' => out.push(c as u8),
            _ => {
                let index = VIETNAMESE_GLYPHS
                    .iter()
                    .position(|(glyph, _)| *glyph == c)
                    .unwrap_or_else(|| panic!("no fixture glyph for {:?}", c));
                out.push(128 + index as u8);
            }
        }
    }
    out
}

fn content_stream(lines: &[&str]) -> Vec<u8> {
    let mut stream = b"BT\n/F1 12 Tf\n72 720 Td\n".to_vec();
    for line in lines {
        stream.push(b'(');
        stream.extend(encode_line(line));
        stream.extend_from_slice(b") Tj\n0 -14 Td\n");
    }
    stream.extend_from_slice(b"ET\n");
    stream
}

fn font_object() -> Vec<u8> {
    let differences: Vec<String> = VIETNAMESE_GLYPHS
        .iter()
        .map(|(_, name)| format!("/{}", name))
        .collect();
    let widths = vec![GLYPH_WIDTH.to_string(); LAST_CHAR - FIRST_CHAR + 1].join(" ");

    format!(
        "<< /Type /Font /Subtype /Type1 /BaseFont /FixtureSans \
         /Encoding << /Type /Encoding /BaseEncoding /WinAnsiEncoding /Differences [128 {}] >> \
         /FirstChar {} /LastChar {} /Widths [{}] /FontDescriptor 6 0 R >>",
        differences.join(" "),
        FIRST_CHAR,
        LAST_CHAR,
        widths
    )
    .into_bytes()
}

/// A one-page PDF drawing each of `lines` on its own line.
pub fn pdf_with_lines(lines: &[&str]) -> Vec<u8> {
    let stream = content_stream(lines);
    let mut contents = format!("<< /Length {} >>\nstream\n", stream.len()).into_bytes();
    contents.extend(stream);
    contents.extend_from_slice(b"\nendstream");

    let objects: Vec<Vec<u8>> = vec![
        b"<< /Type /Catalog /Pages 2 0 R >>".to_vec(),
        b"<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_vec(),
        b"<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
           /Resources << /Font << /F1 4 0 R >> >> /Contents 5 0 R >>"
            .to_vec(),
        font_object(),
        contents,
        b"<< /Type /FontDescriptor /FontName /FixtureSans /Flags 32 \
           /FontBBox [0 -200 1000 900] /ItalicAngle 0 /Ascent 900 /Descent -200 \
           /CapHeight 700 /StemV 80 /MissingWidth 500 >>"
            .to_vec(),
    ];

    let mut pdf = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.extend(format!("{} 0 obj\n", i + 1).into_bytes());
        pdf.extend_from_slice(body);
        pdf.extend_from_slice(b"\nendobj\n");
    }

    let xref_offset = pdf.len();
    pdf.extend(format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).into_bytes());
    for offset in offsets {
        pdf.extend(format!("{:010} 00000 n \n", offset).into_bytes());
    }
    pdf.extend(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        )
        .into_bytes(),
    );
    pdf
}

/// Preface plus two chapters.
pub fn book_pdf() -> Vec<u8> {
    pdf_with_lines(&[
        "LỜI NÓI ĐẦU",
        "Preface text",
        "Chương 1",
        "The first chapter",
        "Chương 2",
        "The second chapter",
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_line() {
        assert_eq!(encode_line("a(b)"), b"a\\(b\\)".to_vec());
        assert_eq!(encode_line("ư"), vec![132]);
    }

    #[test]
    fn test_pdf_layout() {
        let pdf = book_pdf();
        assert!(pdf.starts_with(b"%PDF-1.4"));
        assert!(pdf.ends_with(b"%%EOF\n"));
        let text = String::from_utf8_lossy(&pdf);
        assert!(text.contains("/Differences [128 /Ohorngrave"));
        assert!(text.contains("xref\n0 7\n"));
    }
}
