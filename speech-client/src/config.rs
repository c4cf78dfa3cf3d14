use serde::{Deserialize, Serialize};

use crate::error::{Result, SpeechError};

/// Google Translate only accepts this many characters per request.
pub const GOOGLE_MAX_CHUNK_CHARS: usize = 100;

/// Speech synthesis configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Provider identifier (google-translate)
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Language code passed to the provider
    #[serde(default = "default_lang")]
    pub lang: String,

    /// Base URL of the provider endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Maximum characters sent in one provider request
    #[serde(default = "default_max_chunk_chars")]
    pub max_chunk_chars: usize,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_provider() -> String {
    "google-translate".to_string()
}

fn default_lang() -> String {
    "vi".to_string()
}

fn default_base_url() -> String {
    "https://translate.google.com".to_string()
}

fn default_max_chunk_chars() -> usize {
    GOOGLE_MAX_CHUNK_CHARS
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            lang: default_lang(),
            base_url: default_base_url(),
            max_chunk_chars: default_max_chunk_chars(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SpeechConfig {
    /// Reject values no provider can work with
    pub fn validate(&self) -> Result<()> {
        if self.lang.trim().is_empty() {
            return Err(SpeechError::ConfigError("lang must not be empty".into()));
        }
        if self.max_chunk_chars == 0 {
            return Err(SpeechError::ConfigError(
                "max_chunk_chars must be greater than zero".into(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(SpeechError::ConfigError(
                "timeout_secs must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
