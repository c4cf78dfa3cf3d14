//! pdf-chapters configuration management.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use speech_client::SpeechConfig;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_MAX_UPLOAD_MB: usize = 50;
const DEFAULT_PREVIEW_CHARS: usize = 500;
const DEFAULT_AUDIO_MAX_AGE_SECS: u64 = 3600;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding PDFs addressed by file ID
    #[serde(default = "default_uploads_dir")]
    pub uploads_dir: PathBuf,

    /// Directory where synthesized audio files are written
    #[serde(default = "default_audio_dir")]
    pub audio_dir: PathBuf,

    /// Audio files older than this are deleted before a new one is written
    /// (0 keeps them forever)
    #[serde(default = "default_audio_max_age_secs")]
    pub audio_max_age_secs: u64,

    /// Largest accepted upload or remote document, in megabytes
    #[serde(default = "default_max_upload_mb")]
    pub max_upload_mb: usize,

    /// Characters of unparsed text echoed back when no chapter is found
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,

    #[serde(default)]
    pub speech: SpeechConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_uploads_dir() -> PathBuf {
    PathBuf::from("/uploads")
}

fn default_audio_dir() -> PathBuf {
    std::env::temp_dir()
}

fn default_audio_max_age_secs() -> u64 {
    DEFAULT_AUDIO_MAX_AGE_SECS
}

fn default_max_upload_mb() -> usize {
    DEFAULT_MAX_UPLOAD_MB
}

fn default_preview_chars() -> usize {
    DEFAULT_PREVIEW_CHARS
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            uploads_dir: default_uploads_dir(),
            audio_dir: default_audio_dir(),
            audio_max_age_secs: default_audio_max_age_secs(),
            max_upload_mb: default_max_upload_mb(),
            preview_chars: default_preview_chars(),
            speech: SpeechConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Get the default config file path: <config dir>/cli-programs/pdf-chapters.toml
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cli-programs")
            .join("pdf-chapters.toml")
    }

    /// Load config from `path` (or the default location), returning
    /// defaults if the file doesn't exist
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::config_path);

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Address string for the listener
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Upload limit in bytes
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }

    /// Retention for synthesized audio, `None` when files are kept
    pub fn audio_max_age(&self) -> Option<Duration> {
        (self.audio_max_age_secs > 0).then(|| Duration::from_secs(self.audio_max_age_secs))
    }

    /// Render as TOML for display
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}
