// Chapter segmentation of extracted document text

use once_cell::sync::Lazy;
use regex::Regex;

/// Heading markers: the preface label, or the chapter keyword followed by
/// whitespace and a number. Case-insensitive, Unicode `\s` and `\d`.
/// The information separators U+001C..U+001F count as whitespace.
static HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)LỜI NÓI ĐẦU|Chương[\s\x1C-\x1F]+\d+").expect("heading pattern is valid")
});

fn is_space(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

fn trim_spaces(s: &str) -> &str {
    s.trim_matches(is_space)
}

/// A titled section of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    /// Heading exactly as it appears in the text, trimmed
    pub title: String,
    /// Text between this heading and the next one, trimmed
    pub content: String,
}

impl Chapter {
    fn open(title: &str) -> Self {
        Self {
            title: trim_spaces(title).to_string(),
            content: String::new(),
        }
    }
}

/// Split document text into chapters at heading markers.
///
/// Headings are matched case-insensitively and emitted with their original
/// casing, in document order. Text before the first heading is dropped.
/// Consecutive headings produce chapters with empty content. Text without
/// any heading yields no chapters.
pub fn split_chapters(text: &str) -> Vec<Chapter> {
    let mut chapters: Vec<Chapter> = Vec::new();
    let mut gap_start = 0;

    for heading in HEADING.find_iter(text) {
        append_gap(&mut chapters, &text[gap_start..heading.start()]);
        chapters.push(Chapter::open(heading.as_str()));
        gap_start = heading.end();
    }
    append_gap(&mut chapters, &text[gap_start..]);

    for chapter in &mut chapters {
        chapter.content = trim_spaces(&chapter.content).to_string();
    }

    chapters
}

/// Add the text between two headings to the chapter opened last.
/// Before the first heading there is no chapter and the text is discarded.
fn append_gap(chapters: &mut [Chapter], gap: &str) {
    if let Some(current) = chapters.last_mut() {
        current.content.push_str(trim_spaces(gap));
        current.content.push('\n');
    }
}
