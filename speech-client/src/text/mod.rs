//! Text preparation for speech synthesis: cleaning and request-sized chunking.

mod chunker;
mod cleaner;
mod seams;

pub use chunker::chunk_text;
pub use cleaner::clean_text;

/// Split text into pieces a provider accepts in one request.
///
/// Sentences are packed as tightly as `max_chars` allows.
pub fn request_chunks(text: &str, max_chars: usize) -> Vec<String> {
    chunk_text(text, max_chars, max_chars)
}
