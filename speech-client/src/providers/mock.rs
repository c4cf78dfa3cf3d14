//! Mock speech provider for testing
//!
//! Returns canned audio or a canned error and records what it was asked.

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{Result, SpeechError};
use crate::provider::{MPEG_AUDIO, SpeechAudio, SpeechProvider, SpeechRequest};

/// A mock provider for exercising callers without network access
pub struct MockProvider {
    /// Audio returned on success
    audio: Vec<u8>,
    /// Error message returned on every call (None = always succeed)
    fail_with: Option<String>,
    call_count: AtomicUsize,
    last_request: Mutex<Option<SpeechRequest>>,
}

impl MockProvider {
    /// Create a provider that always returns `audio`
    pub fn always_succeeds(audio: &[u8]) -> Self {
        Self {
            audio: audio.to_vec(),
            fail_with: None,
            call_count: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Create a provider that always fails with an API error carrying `message`
    pub fn always_fails(message: &str) -> Self {
        Self {
            audio: Vec::new(),
            fail_with: Some(message.to_string()),
            call_count: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Get the number of times synthesize() was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// The most recent request, if any
    pub fn last_request(&self) -> Option<SpeechRequest> {
        self.last_request
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
    }
}

#[async_trait]
impl SpeechProvider for MockProvider {
    async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechAudio> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request.clone());
        }

        if request.text.trim().is_empty() {
            return Err(SpeechError::EmptyText);
        }

        if let Some(message) = &self.fail_with {
            return Err(SpeechError::ApiError {
                message: message.clone(),
                status_code: None,
            });
        }

        Ok(SpeechAudio {
            bytes: self.audio.clone(),
            mime_type: MPEG_AUDIO,
        })
    }

    fn name(&self) -> &'static str {
        "mock"
    }

    fn is_available(&self) -> Result<()> {
        Ok(())
    }
}
