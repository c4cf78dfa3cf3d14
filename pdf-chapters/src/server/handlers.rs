//! Request handlers: every processing endpoint is acquire -> extract -> segment.

use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::{Value, json};
use speech_client::SpeechRequest;

use super::error::ApiError;
use super::extract::{JsonBody, QueryParams};
use super::state::AppState;
use crate::audio;
use crate::response::{ChapterFormat, ChapterOutput, render};
use crate::source::{self, SourceError};

#[derive(Debug, Default, Deserialize)]
pub struct FormatQuery {
    #[serde(default)]
    pub format: ChapterFormat,
}

#[derive(Debug, Deserialize)]
pub struct FileIdRequest {
    pub file_id: String,
}

#[derive(Debug, Deserialize)]
pub struct UrlRequest {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct TextToSpeechRequest {
    pub text: String,
    /// Reading speed hint; below 1.0 selects slow speech
    #[serde(default = "default_speed")]
    pub speed: f32,
}

fn default_speed() -> f32 {
    1.0
}

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "pdf-chapters is running" }))
}

/// Extract, segment and shape the chapters of a PDF.
async fn chapters_from_pdf(
    state: &AppState,
    bytes: Vec<u8>,
    format: ChapterFormat,
    origin: &str,
) -> Result<Json<ChapterOutput>, ApiError> {
    let text = source::extract_text_blocking(bytes).await?;
    log::info!("{}: extracted {} characters", origin, text.chars().count());

    match render(&text, format, state.config.preview_chars) {
        Ok(chapters) => {
            log::info!("{}: {} chapter(s)", origin, chapters.count());
            Ok(Json(chapters))
        }
        Err(no_chapters) => Err(ApiError::NoChapters {
            preview: no_chapters.preview,
        }),
    }
}

pub async fn process_pdf(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<FormatQuery>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ChapterOutput>, ApiError> {
    let mut multipart = multipart?;
    let limit = state.config.max_upload_bytes();
    let multipart_error = |e: axum::extract::multipart::MultipartError| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::Source(SourceError::TooLarge { limit })
        } else {
            ApiError::BadRequest(format!("Invalid multipart body: {}", e))
        }
    };

    let mut named: Option<(String, Vec<u8>)> = None;
    let mut fallback: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let is_file_part = field.name() == Some("file");
        if !is_file_part && (field.file_name().is_none() || fallback.is_some()) {
            continue;
        }
        let filename = field.file_name().unwrap_or("upload.pdf").to_string();
        let bytes = field.bytes().await.map_err(multipart_error)?.to_vec();
        if is_file_part {
            named = Some((filename, bytes));
            break;
        }
        fallback = Some((filename, bytes));
    }

    let (filename, bytes) = named.or(fallback).ok_or_else(|| {
        ApiError::BadRequest("Missing PDF upload: send it in a multipart part named 'file'".into())
    })?;

    log::info!("Processing upload {} ({} bytes)", filename, bytes.len());
    chapters_from_pdf(&state, bytes, query.format, &filename).await
}

pub async fn process_pdf_by_id(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<FormatQuery>,
    JsonBody(req): JsonBody<FileIdRequest>,
) -> Result<Json<ChapterOutput>, ApiError> {
    log::info!("Processing stored file ID: {}", req.file_id);
    let bytes = source::read_stored_pdf(&state.config.uploads_dir, &req.file_id).await?;
    chapters_from_pdf(&state, bytes, query.format, &req.file_id).await
}

pub async fn process_pdf_url(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<FormatQuery>,
    JsonBody(req): JsonBody<UrlRequest>,
) -> Result<Json<ChapterOutput>, ApiError> {
    log::info!("Processing remote PDF: {}", req.url);
    let bytes =
        source::fetch_pdf(&state.http, &req.url, state.config.max_upload_bytes()).await?;
    chapters_from_pdf(&state, bytes, query.format, &req.url).await
}

pub async fn text_to_speech(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<TextToSpeechRequest>,
) -> Result<Response, ApiError> {
    if req.text.trim().is_empty() {
        return Err(ApiError::BadRequest("Text must not be empty".into()));
    }
    if !req.speed.is_finite() || req.speed <= 0.0 {
        return Err(ApiError::BadRequest(format!(
            "Speed must be a positive number, got {}",
            req.speed
        )));
    }

    let request = SpeechRequest::new(req.text, state.config.speech.lang.clone())
        .slow(req.speed < 1.0);
    let speech = state.speech.synthesize(request).await?;

    if let Some(max_age) = state.config.audio_max_age() {
        if let Err(e) = audio::prune(&state.config.audio_dir, max_age).await {
            log::warn!("Failed to remove expired audio files: {}", e);
        }
    }
    let (filename, path) = audio::save(&state.config.audio_dir, &speech.bytes).await?;
    log::info!("Wrote {} bytes of audio to {}", speech.bytes.len(), path.display());

    Ok((
        [
            (CONTENT_TYPE, speech.mime_type.to_string()),
            (CONTENT_DISPOSITION, format!("attachment; filename={}", filename)),
        ],
        speech.bytes,
    )
        .into_response())
}
