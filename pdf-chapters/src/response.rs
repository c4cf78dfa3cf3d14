//! Shaping segmenter output for clients.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::chapters::{Chapter, split_chapters};

/// A chapter with its 1-based position in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumberedChapter {
    pub id: usize,
    pub title: String,
    pub content: String,
}

/// How a chapter list is serialized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ChapterFormat {
    /// Array of `{id, title, content}`
    #[default]
    List,
    /// Object mapping title to content
    Map,
}

/// The document had text but no recognizable headings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoChapters {
    /// Start of the unparsed text, for diagnosis
    pub preview: String,
}

/// Assign ids in emission order.
pub fn number_chapters(chapters: Vec<Chapter>) -> Vec<NumberedChapter> {
    chapters
        .into_iter()
        .enumerate()
        .map(|(i, c)| NumberedChapter {
            id: i + 1,
            title: c.title,
            content: c.content,
        })
        .collect()
}

/// Chapters shaped for a client.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChapterOutput {
    List(Vec<NumberedChapter>),
    Map(Map<String, Value>),
}

impl ChapterOutput {
    /// Number of entries in the output
    pub fn count(&self) -> usize {
        match self {
            ChapterOutput::List(chapters) => chapters.len(),
            ChapterOutput::Map(map) => map.len(),
        }
    }
}

/// Shape chapters in the requested format.
///
/// In `Map` form a repeated title keeps its first position and takes the
/// content of its last occurrence.
pub fn shape(chapters: Vec<Chapter>, format: ChapterFormat) -> ChapterOutput {
    match format {
        ChapterFormat::List => ChapterOutput::List(number_chapters(chapters)),
        ChapterFormat::Map => {
            let mut map = Map::new();
            for c in chapters {
                map.insert(c.title, Value::String(c.content));
            }
            ChapterOutput::Map(map)
        }
    }
}

/// First `max_chars` characters of `text`.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => text[..cut].to_string(),
        None => text.to_string(),
    }
}

/// Segment `text` and shape the result, treating an empty result as
/// a failure that carries a preview of the text.
pub fn render(
    text: &str,
    format: ChapterFormat,
    preview_chars: usize,
) -> Result<ChapterOutput, NoChapters> {
    let chapters = split_chapters(text);
    if chapters.is_empty() {
        return Err(NoChapters {
            preview: preview(text, preview_chars),
        });
    }
    Ok(shape(chapters, format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render_json(text: &str, format: ChapterFormat) -> Value {
        serde_json::to_value(render(text, format, 10).unwrap()).unwrap()
    }

    #[test]
    fn test_number_chapters() {
        let numbered = number_chapters(split_chapters("Chương 1 a Chương 2 b"));
        assert_eq!(numbered.len(), 2);
        assert_eq!(numbered[0].id, 1);
        assert_eq!(numbered[1].id, 2);
        assert_eq!(numbered[1].title, "Chương 2");
    }

    #[test]
    fn test_render_list() {
        let value = render_json("LỜI NÓI ĐẦU x Chương 1 y", ChapterFormat::List);
        assert_eq!(
            value,
            json!([
                { "id": 1, "title": "LỜI NÓI ĐẦU", "content": "x" },
                { "id": 2, "title": "Chương 1", "content": "y" },
            ])
        );
    }

    #[test]
    fn test_render_map_preserves_order() {
        let value = render_json("Chương 2 b Chương 1 a", ChapterFormat::Map);
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["Chương 2", "Chương 1"]);
        assert_eq!(value["Chương 1"], "a");
    }

    #[test]
    fn test_render_map_duplicate_title() {
        let value = render_json("Chương 1 a Chương 2 b Chương 1 c", ChapterFormat::Map);
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(object.keys().next().unwrap(), "Chương 1");
        assert_eq!(value["Chương 1"], "c");
    }

    #[test]
    fn test_output_len() {
        let text = "Chương 1 a Chương 2 b Chương 1 c";
        assert_eq!(render(text, ChapterFormat::List, 10).unwrap().count(), 3);
        assert_eq!(render(text, ChapterFormat::Map, 10).unwrap().count(), 2);
    }

    #[test]
    fn test_render_no_chapters_previews() {
        let err = render("Tài liệu không có chương", ChapterFormat::List, 8).unwrap_err();
        assert_eq!(err.preview, "Tài liệu");
    }

    #[test]
    fn test_preview_char_boundaries() {
        assert_eq!(preview("đầu tiên", 3), "đầu");
        assert_eq!(preview("ngắn", 100), "ngắn");
        assert_eq!(preview("", 5), "");
        assert_eq!(preview("abc", 0), "");
    }

    #[test]
    fn test_format_deserialize() {
        let format: ChapterFormat = serde_json::from_str("\"map\"").unwrap();
        assert_eq!(format, ChapterFormat::Map);
        assert_eq!(ChapterFormat::default(), ChapterFormat::List);
    }
}
