//! Speech provider implementations

mod google_translate;
pub mod mock;

pub use google_translate::GoogleTranslateProvider;
pub use mock::MockProvider;

use crate::config::SpeechConfig;
use crate::error::{Result, SpeechError};
use crate::provider::SpeechProvider;

/// Supported provider types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    GoogleTranslate,
}

impl ProviderKind {
    /// Parse provider kind from string
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "google-translate" | "google_translate" | "gtts" | "google" => {
                Ok(Self::GoogleTranslate)
            }
            _ => Err(SpeechError::ConfigError(format!("Unknown provider: {}", s))),
        }
    }
}

/// Create a provider instance from configuration
pub fn get_provider(config: &SpeechConfig) -> Result<Box<dyn SpeechProvider>> {
    config.validate()?;

    match ProviderKind::from_str(&config.provider)? {
        ProviderKind::GoogleTranslate => Ok(Box::new(GoogleTranslateProvider::new(config)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_kind_aliases() {
        for name in ["google-translate", "Google_Translate", "gtts"] {
            assert_eq!(
                ProviderKind::from_str(name).unwrap(),
                ProviderKind::GoogleTranslate
            );
        }
        assert!(ProviderKind::from_str("polly").is_err());
    }

    #[test]
    fn test_get_provider_default() {
        let provider = get_provider(&SpeechConfig::default()).unwrap();
        assert_eq!(provider.name(), "google-translate");
    }

    #[test]
    fn test_get_provider_invalid_config() {
        let config = SpeechConfig {
            lang: " ".to_string(),
            ..SpeechConfig::default()
        };
        assert!(get_provider(&config).is_err());
    }
}
