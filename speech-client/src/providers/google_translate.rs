//! Google Translate text-to-speech provider
//!
//! Uses the public `translate_tts` endpoint that backs the speaker button on
//! translate.google.com. The endpoint accepts a limited number of characters
//! per request and answers with an MP3 stream, so longer text is sent as
//! consecutive requests whose MP3 frames are concatenated in order.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

use crate::config::SpeechConfig;
use crate::error::{Result, SpeechError};
use crate::provider::{MPEG_AUDIO, SpeechAudio, SpeechProvider, SpeechRequest};
use crate::text::request_chunks;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

const NORMAL_SPEED: &str = "1";
const SLOW_SPEED: &str = "0.3";

/// Provider for the Google Translate TTS endpoint
pub struct GoogleTranslateProvider {
    base_url: String,
    max_chunk_chars: usize,
    client: Client,
}

impl GoogleTranslateProvider {
    pub fn new(config: &SpeechConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| SpeechError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_chunk_chars: config.max_chunk_chars,
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/translate_tts", self.base_url)
    }

    async fn fetch_chunk(
        &self,
        chunk: &str,
        request: &SpeechRequest,
        idx: usize,
        total: usize,
    ) -> Result<Vec<u8>> {
        let params = query_params(chunk, &request.lang, request.slow, idx, total);

        let response = self
            .client
            .get(self.endpoint())
            .query(&params)
            .send()
            .await
            .map_err(|e| SpeechError::ApiError {
                message: format!("Request failed: {}", e),
                status_code: None,
            })?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok());
            let message = response.text().await.unwrap_or_default();
            return Err(status_error(status, message, retry_after));
        }

        let bytes = response.bytes().await.map_err(|e| SpeechError::ApiError {
            message: format!("Failed to read audio: {}", e),
            status_code: Some(status.as_u16()),
        })?;

        if bytes.is_empty() {
            return Err(SpeechError::EmptyAudio { index: idx });
        }

        Ok(bytes.to_vec())
    }
}

fn query_params(
    chunk: &str,
    lang: &str,
    slow: bool,
    idx: usize,
    total: usize,
) -> Vec<(&'static str, String)> {
    vec![
        ("ie", "UTF-8".to_string()),
        ("client", "tw-ob".to_string()),
        ("tl", lang.to_string()),
        ("q", chunk.to_string()),
        ("total", total.to_string()),
        ("idx", idx.to_string()),
        ("textlen", chunk.chars().count().to_string()),
        (
            "ttsspeed",
            if slow { SLOW_SPEED } else { NORMAL_SPEED }.to_string(),
        ),
    ]
}

fn status_error(status: StatusCode, message: String, retry_after: Option<u64>) -> SpeechError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        SpeechError::RateLimited { retry_after }
    } else if status.is_server_error() {
        SpeechError::ServiceUnavailable {
            message,
            status_code: status.as_u16(),
        }
    } else {
        SpeechError::ApiError {
            message,
            status_code: Some(status.as_u16()),
        }
    }
}

#[async_trait]
impl SpeechProvider for GoogleTranslateProvider {
    async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechAudio> {
        let chunks = request_chunks(&request.text, self.max_chunk_chars);
        if chunks.is_empty() {
            return Err(SpeechError::EmptyText);
        }

        log::debug!(
            "Synthesizing {} chunk(s) with Google Translate (lang={}, slow={})",
            chunks.len(),
            request.lang,
            request.slow
        );

        // The endpoint throttles concurrent requests from one client.
        let total = chunks.len();
        let mut bytes = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            bytes.extend(self.fetch_chunk(chunk, &request, idx, total).await?);
        }

        Ok(SpeechAudio {
            bytes,
            mime_type: MPEG_AUDIO,
        })
    }

    fn name(&self) -> &'static str {
        "google-translate"
    }

    fn is_available(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.base_url).map_err(|e| {
            SpeechError::ProviderUnavailable(format!("invalid base_url {:?}: {}", self.base_url, e))
        })?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(SpeechError::ProviderUnavailable(format!(
                "base_url must use http or https, got {:?}",
                other
            ))),
        }
    }
}
