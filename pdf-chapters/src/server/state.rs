use anyhow::{Context, Result};
use speech_client::SpeechProvider;
use std::sync::Arc;
use std::time::Duration;

use crate::config::ServerConfig;

/// Timeout for downloading a remote document.
const FETCH_TIMEOUT_SECS: u64 = 120;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub http: reqwest::Client,
    pub speech: Arc<dyn SpeechProvider>,
}

impl AppState {
    /// Build state with the speech provider named in the configuration.
    pub fn new(config: ServerConfig) -> Result<Self> {
        let speech = speech_client::get_provider(&config.speech)
            .context("Failed to create speech provider")?;
        speech
            .is_available()
            .with_context(|| format!("Speech provider {} is not usable", speech.name()))?;
        log::info!("Speech provider: {} (lang={})", speech.name(), config.speech.lang);
        Self::with_speech(config, Arc::from(speech))
    }

    /// Build state around an existing speech provider.
    pub fn with_speech(config: ServerConfig, speech: Arc<dyn SpeechProvider>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(30))
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            config: Arc::new(config),
            http,
            speech,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use speech_client::SpeechConfig;

    #[test]
    fn test_new_uses_configured_provider() {
        let state = AppState::new(ServerConfig::default()).unwrap();
        assert_eq!(state.speech.name(), "google-translate");
    }

    #[test]
    fn test_new_rejects_unusable_provider() {
        let config = ServerConfig {
            speech: SpeechConfig {
                base_url: "ftp://translate.google.com".to_string(),
                ..SpeechConfig::default()
            },
            ..ServerConfig::default()
        };
        let err = AppState::new(config).err().unwrap();
        assert!(err.to_string().contains("not usable"));
    }
}
