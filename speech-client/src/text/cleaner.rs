//! Text normalization before synthesis.
//!
//! Chapter text comes out of PDF extraction with hard line wraps, hyphenated
//! line breaks and typographic punctuation. Speech engines read the wraps as
//! pauses and some of the punctuation aloud, so it is flattened here.

/// Typographic characters and the plain replacement the engine reads well.
const SPEECH_REPLACEMENTS: &[(char, &str)] = &[
    ('\u{2018}', "'"),  // Left single quote
    ('\u{2019}', "'"),  // Right single quote
    ('\u{201c}', "\""), // Left double quote
    ('\u{201d}', "\""), // Right double quote
    ('\u{00ab}', "\""), // Left-pointing double angle quote
    ('\u{00bb}', "\""), // Right-pointing double angle quote
    ('\u{2013}', ", "), // En dash
    ('\u{2014}', ", "), // Em dash
    ('\u{2026}', "."),  // Ellipsis
    ('\u{00a0}', " "),  // Non-breaking space
    ('\u{00ad}', ""),   // Soft hyphen
    ('\u{200b}', ""),   // Zero-width space
    ('\u{200c}', ""),   // Zero-width non-joiner
    ('\u{200d}', ""),   // Zero-width joiner
    ('\u{feff}', ""),   // BOM
    ('\u{2022}', ""),   // Bullet
];

/// Clean text for speech synthesis.
///
/// Joins words hyphenated across a line break, replaces typographic
/// punctuation, drops control characters, collapses every whitespace run
/// (newlines included) to one space and squeezes repeated periods.
pub fn clean_text(text: &str) -> String {
    let joined = join_hyphenated_breaks(text);
    let mut result = String::with_capacity(joined.len());

    for c in joined.chars() {
        if let Some((_, r)) = SPEECH_REPLACEMENTS.iter().find(|(ch, _)| *ch == c) {
            result.push_str(r);
        } else if c.is_whitespace() {
            result.push(' ');
        } else if !c.is_control() {
            result.push(c);
        }
    }

    squeeze_periods(&collapse_spaces(&result))
}

/// "exam-\nple" -> "example"
fn join_hyphenated_breaks(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '-' && chars.peek() == Some(&'\n') {
            let prev_is_letter = result.chars().last().is_some_and(char::is_alphabetic);
            if prev_is_letter {
                chars.next();
                while chars.peek().is_some_and(|n| *n == ' ' || *n == '\t') {
                    chars.next();
                }
                continue;
            }
        }
        result.push(c);
    }

    result
}

fn collapse_spaces(text: &str) -> String {
    text.split(' ')
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .replace(" ,", ",")
        .replace(",,", ",")
}

/// Runs of periods make some engines emit noise; keep one.
fn squeeze_periods(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut prev_period = false;

    for c in text.chars() {
        if c == '.' {
            if !prev_period {
                result.push(c);
            }
            prev_period = true;
        } else {
            prev_period = false;
            result.push(c);
        }
    }

    result
}
