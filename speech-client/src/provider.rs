use async_trait::async_trait;

use crate::error::Result;

/// MIME type of the audio every provider produces.
pub const MPEG_AUDIO: &str = "audio/mpeg";

/// Request to send to a speech provider
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechRequest {
    pub text: String,
    /// Language code understood by the provider (e.g. "vi", "en")
    pub lang: String,
    /// Read more slowly than the provider's normal pace
    pub slow: bool,
}

impl SpeechRequest {
    pub fn new(text: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            lang: lang.into(),
            slow: false,
        }
    }

    pub fn slow(mut self, slow: bool) -> Self {
        self.slow = slow;
        self
    }
}

/// Synthesized audio returned by a provider
#[derive(Debug, Clone)]
pub struct SpeechAudio {
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
}

/// Trait for speech providers
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Synthesize the request's text into a single audio stream
    async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechAudio>;

    /// Get the provider name for display
    fn name(&self) -> &'static str;

    /// Check if the provider can be used with its current configuration
    fn is_available(&self) -> Result<()>;
}
