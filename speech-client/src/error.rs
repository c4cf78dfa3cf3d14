use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpeechError {
    #[error("Nothing to synthesize: text is empty after cleaning")]
    EmptyText,

    #[error("Provider not available: {0}")]
    ProviderUnavailable(String),

    #[error("Rate limit exceeded{}", .retry_after.map(|s| format!(". Retry after {} seconds", s)).unwrap_or_default())]
    RateLimited { retry_after: Option<u64> },

    #[error("Speech service unavailable (HTTP {status_code}): {message}")]
    ServiceUnavailable { message: String, status_code: u16 },

    #[error("API error{}: {message}", status_code.map(|c| format!(" (HTTP {})", c)).unwrap_or_default())]
    ApiError {
        message: String,
        status_code: Option<u16>,
    },

    #[error("Provider returned no audio for chunk {index}")]
    EmptyAudio { index: usize },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, SpeechError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limited_message() {
        let err = SpeechError::RateLimited {
            retry_after: Some(30),
        };
        assert_eq!(err.to_string(), "Rate limit exceeded. Retry after 30 seconds");

        let err = SpeechError::RateLimited { retry_after: None };
        assert_eq!(err.to_string(), "Rate limit exceeded");
    }

    #[test]
    fn test_api_error_message() {
        let err = SpeechError::ApiError {
            message: "bad request".to_string(),
            status_code: Some(400),
        };
        assert_eq!(err.to_string(), "API error (HTTP 400): bad request");
    }
}
