use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use speech_client::SpeechError;

use crate::source::SourceError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    /// A request body or query string that could not be decoded
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error("No chapters found in the PDF. The PDF must contain 'Chương 1', 'Chương 2', or 'LỜI NÓI ĐẦU'")]
    NoChapters { preview: String },
    #[error("Speech synthesis failed: {0}")]
    Speech(#[from] SpeechError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::NoChapters { .. } => StatusCode::BAD_REQUEST,
            ApiError::Rejected { status, .. } => *status,
            ApiError::Source(e) => match e {
                SourceError::InvalidId(_)
                | SourceError::InvalidUrl { .. }
                | SourceError::EmptyText => StatusCode::BAD_REQUEST,
                SourceError::NotFound { .. } | SourceError::RemoteNotFound(_) => {
                    StatusCode::NOT_FOUND
                }
                SourceError::Fetch { .. } => StatusCode::BAD_GATEWAY,
                SourceError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
                SourceError::NotPdf => StatusCode::UNSUPPORTED_MEDIA_TYPE,
                SourceError::Unreadable(_) => StatusCode::UNPROCESSABLE_ENTITY,
                SourceError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Speech(e) => match e {
                SpeechError::EmptyText => StatusCode::BAD_REQUEST,
                SpeechError::RateLimited { .. } | SpeechError::ServiceUnavailable { .. } => {
                    StatusCode::SERVICE_UNAVAILABLE
                }
                SpeechError::ProviderUnavailable(_) | SpeechError::ConfigError(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
                SpeechError::ApiError { .. } | SpeechError::EmptyAudio { .. } => {
                    StatusCode::BAD_GATEWAY
                }
            },
            ApiError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("{}", self);
        } else {
            log::warn!("{}", self);
        }

        let detail = match &self {
            ApiError::Io(_) | ApiError::Source(SourceError::Io(_)) => {
                "internal server error".to_string()
            }
            _ => self.to_string(),
        };

        let body = match &self {
            ApiError::NoChapters { preview } => json!({ "detail": detail, "preview": preview }),
            ApiError::Source(SourceError::NotFound { available, .. }) => {
                json!({ "detail": detail, "available_files": available })
            }
            _ => json!({ "detail": detail }),
        };

        (status, axum::Json(body)).into_response()
    }
}
