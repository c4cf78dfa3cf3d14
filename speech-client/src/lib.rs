//! Text-to-speech client library for the pdf-chapters workspace
//!
//! Provides a provider-agnostic interface for turning text into MP3 audio:
//! - Google Translate TTS (HTTP)
//! - Mock provider for tests

pub mod config;
pub mod error;
pub mod provider;
pub mod providers;
pub mod text;

pub use config::SpeechConfig;
pub use error::{Result, SpeechError};
pub use provider::{MPEG_AUDIO, SpeechAudio, SpeechProvider, SpeechRequest};
pub use providers::{GoogleTranslateProvider, MockProvider, ProviderKind, get_provider};
