//! Splitting text into provider-sized requests.
//!
//! All sizes are counted in characters, not bytes: providers limit the
//! number of characters per request and Vietnamese text is mostly
//! multi-byte.

use super::cleaner::clean_text;
use super::seams::split_into_sentences;

/// Maximum recursion depth for splitting long sentences.
const MAX_SPLIT_DEPTH: usize = 10;

/// Break points tried, in order, inside a sentence that is too long.
const DELIMITERS: &[&str] = &[";", ":", ",", " - "];

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Split text into chunks of at most `max_size` characters.
///
/// Whole sentences are packed together up to `target_size`; a sentence
/// longer than `max_size` is broken at clause punctuation, then at word
/// boundaries, then at exact character positions.
pub fn chunk_text(text: &str, target_size: usize, max_size: usize) -> Vec<String> {
    let text = clean_text(text);
    if text.is_empty() {
        return Vec::new();
    }

    let target_size = target_size.min(max_size).max(1);
    let max_size = max_size.max(1);

    let mut chunks = Vec::new();
    let mut current = String::new();

    for sentence in split_into_sentences(&text) {
        if char_len(&sentence) > max_size {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }
            chunks.extend(
                split_long_sentence(&sentence, max_size, 0)
                    .into_iter()
                    .filter(|p| !p.is_empty()),
            );
        } else if current.is_empty() {
            current = sentence;
        } else if char_len(&current) + char_len(&sentence) + 1 <= target_size {
            current.push(' ');
            current.push_str(&sentence);
        } else {
            chunks.push(std::mem::replace(&mut current, sentence));
        }
    }

    if !current.trim().is_empty() {
        chunks.push(current.trim().to_string());
    }

    chunks
}

/// Split a long sentence at natural break points.
fn split_long_sentence(sentence: &str, max_length: usize, depth: usize) -> Vec<String> {
    if depth > MAX_SPLIT_DEPTH {
        return hard_split(sentence, max_length);
    }

    if char_len(sentence) <= max_length {
        return vec![sentence.to_string()];
    }

    for delimiter in DELIMITERS {
        if !sentence.contains(delimiter) {
            continue;
        }
        let parts: Vec<&str> = sentence.split(delimiter).collect();
        let pieces = reassemble_parts(&parts, delimiter, max_length);
        if pieces.len() > 1 {
            return pieces
                .into_iter()
                .flat_map(|p| {
                    if char_len(&p) > max_length {
                        split_long_sentence(&p, max_length, depth + 1)
                    } else {
                        vec![p]
                    }
                })
                .filter(|p| !p.is_empty())
                .collect();
        }
    }

    let words = split_on_words(sentence, max_length);
    if words.len() > 1 {
        return words
            .into_iter()
            .flat_map(|w| {
                if char_len(&w) > max_length {
                    hard_split(&w, max_length)
                } else {
                    vec![w]
                }
            })
            .collect();
    }

    hard_split(sentence, max_length)
}

/// Rejoin delimiter-split parts, keeping the delimiter on the left piece
/// so the engine still hears the pause.
fn reassemble_parts(parts: &[&str], delimiter: &str, max_length: usize) -> Vec<String> {
    let mark = delimiter.trim();
    let last = parts.len().saturating_sub(1);
    let mut pieces = Vec::new();
    let mut current = String::new();

    for (i, part) in parts.iter().enumerate() {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        let piece = if i < last {
            format!("{}{}", part, mark)
        } else {
            part.to_string()
        };

        if current.is_empty() {
            current = piece;
        } else if char_len(&current) + char_len(&piece) + 1 <= max_length {
            current.push(' ');
            current.push_str(&piece);
        } else {
            pieces.push(std::mem::replace(&mut current, piece));
        }
    }

    if !current.is_empty() {
        pieces.push(current);
    }

    pieces
}

/// Split text on word boundaries.
fn split_on_words(text: &str, max_length: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if char_len(&current) + char_len(word) + 1 <= max_length {
            current.push(' ');
            current.push_str(word);
        } else {
            chunks.push(std::mem::replace(&mut current, word.to_string()));
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

/// Hard split at exact character positions (last resort).
fn hard_split(text: &str, max_length: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(max_length.max(1))
        .map(|c| c.iter().collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_short_text() {
        let chunks = chunk_text("Hello world. How are you?", 100, 100);
        assert_eq!(chunks, vec!["Hello world. How are you?"]);
    }

    #[test]
    fn test_chunk_long_text_respects_max() {
        let text = "First sentence. Second sentence. Third sentence. Fourth sentence. Fifth sentence. Sixth sentence. Seventh sentence.";
        let chunks = chunk_text(text, 40, 40);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(char_len(chunk) <= 40, "Chunk too long: {}", chunk);
        }
    }

    #[test]
    fn test_vietnamese_counted_in_chars() {
        // 20 chars, 27 bytes
        let text = "Trường học đầu tiên.";
        assert!(text.len() > 20);
        let chunks = chunk_text(text, 20, 20);
        assert_eq!(chunks, vec!["Trường học đầu tiên."]);
    }

    #[test]
    fn test_chunk_empty_text() {
        assert!(chunk_text("", 100, 100).is_empty());
        assert!(chunk_text("   \n\n   ", 100, 100).is_empty());
    }

    #[test]
    fn test_split_long_sentence_on_commas() {
        let sentence = "one two three, four five six, seven eight nine, ten eleven twelve";
        let parts = split_long_sentence(sentence, 30, 0);
        assert!(parts.len() > 1);
        for part in &parts {
            assert!(char_len(part) <= 30, "Part too long: {}", part);
        }
        assert!(parts[0].ends_with(','));
    }

    #[test]
    fn test_no_text_lost() {
        let text = "alpha beta gamma delta epsilon zeta eta theta iota kappa lambda mu";
        let chunks = chunk_text(text, 15, 15);
        let rejoined = chunks.join(" ");
        assert_eq!(rejoined, text);
    }

    #[test]
    fn test_hard_split() {
        assert_eq!(hard_split("abcdefghij", 3), vec!["abc", "def", "ghi", "j"]);
        assert_eq!(hard_split("đđđđ", 2), vec!["đđ", "đđ"]);
    }

    #[test]
    fn test_split_on_words() {
        let parts = split_on_words("one two three four five", 10);
        assert_eq!(parts, vec!["one two", "three four", "five"]);
    }
}
