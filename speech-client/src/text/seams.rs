//! Sentence splitting using the seams library (dialog-aware).

use seams::sentence_detector::dialog_detector::SentenceDetectorDialog;
use std::sync::OnceLock;

/// Global detector instance, `None` when seams failed to initialize.
static DETECTOR: OnceLock<Option<SentenceDetectorDialog>> = OnceLock::new();

fn get_detector() -> Option<&'static SentenceDetectorDialog> {
    DETECTOR
        .get_or_init(|| match SentenceDetectorDialog::new() {
            Ok(detector) => Some(detector),
            Err(_) => {
                log::warn!("seams sentence detector unavailable, using punctuation splitting");
                None
            }
        })
        .as_ref()
}

/// Split text into sentences.
///
/// Falls back to splitting after terminal punctuation when seams cannot
/// process the input.
pub fn split_into_sentences(text: &str) -> Vec<String> {
    let detected = get_detector().and_then(|d| d.detect_sentences_borrowed(text).ok());

    match detected {
        Some(sentences) => sentences
            .iter()
            .map(|s| s.normalize())
            .filter(|s| !s.is_empty())
            .collect(),
        None => split_on_terminators(text),
    }
}

fn split_on_terminators(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        let at_boundary = matches!(c, '.' | '!' | '?')
            && chars.peek().is_none_or(|n| n.is_whitespace());
        if at_boundary {
            let sentence = current.trim();
            if !sentence.is_empty() {
                sentences.push(sentence.to_string());
            }
            current.clear();
        }
    }

    let rest = current.trim();
    if !rest.is_empty() {
        sentences.push(rest.to_string());
    }

    sentences
}
