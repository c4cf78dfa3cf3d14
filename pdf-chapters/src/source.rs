//! Document acquisition: stored files, remote URLs and PDF text extraction.

use futures_util::StreamExt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Number of directory entries reported when a stored file is missing.
const LISTED_FILES: usize = 10;

/// Errors raised while turning a document source into text.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Invalid file ID: {0:?}")]
    InvalidId(String),

    #[error("File not found for ID: {id}. Available files: {available:?}")]
    NotFound { id: String, available: Vec<String> },

    #[error("Invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Remote document not found: {0}")]
    RemoteNotFound(String),

    #[error("Failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("Document exceeds the {limit} byte limit")]
    TooLarge { limit: usize },

    #[error("Document is not a PDF")]
    NotPdf,

    #[error("Cannot read PDF: {0}")]
    Unreadable(String),

    #[error("Cannot read any text from the PDF")]
    EmptyText,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SourceError>;

/// Returns true if the bytes carry the PDF magic header.
pub fn is_pdf(head: &[u8]) -> bool {
    head.starts_with(b"%PDF-")
}

/// Extract the full text of a PDF held in memory, trimmed.
pub fn extract_text(bytes: &[u8]) -> Result<String> {
    if !is_pdf(bytes) {
        return Err(SourceError::NotPdf);
    }

    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| SourceError::Unreadable(e.to_string()))?;

    let text = text.trim();
    if text.is_empty() {
        return Err(SourceError::EmptyText);
    }

    Ok(text.to_string())
}

/// Run [`extract_text`] on the blocking pool.
///
/// The PDF library panics on some malformed input; a panic is reported as
/// an unreadable document.
pub async fn extract_text_blocking(bytes: Vec<u8>) -> Result<String> {
    tokio::task::spawn_blocking(move || extract_text(&bytes))
        .await
        .map_err(|e| {
            log::warn!("PDF extraction task failed: {}", e);
            SourceError::Unreadable("the PDF library aborted while parsing".to_string())
        })?
}

/// Locate a stored PDF by its identifier.
///
/// `<id>.pdf` is tried first (or `<id>` unchanged when it already ends in
/// `.pdf`), then `<id>` verbatim.
pub fn resolve_stored_pdf(uploads_dir: &Path, file_id: &str) -> Result<PathBuf> {
    validate_file_id(file_id)?;

    let file_name = if file_id.ends_with(".pdf") {
        file_id.to_string()
    } else {
        format!("{}.pdf", file_id)
    };

    let candidates = [uploads_dir.join(&file_name), uploads_dir.join(file_id)];
    if let Some(found) = candidates.into_iter().find(|p| p.is_file()) {
        return Ok(found);
    }

    Err(SourceError::NotFound {
        id: file_id.to_string(),
        available: list_files(uploads_dir, LISTED_FILES),
    })
}

/// Resolve and read a stored PDF.
pub async fn read_stored_pdf(uploads_dir: &Path, file_id: &str) -> Result<Vec<u8>> {
    let path = resolve_stored_pdf(uploads_dir, file_id)?;
    log::info!("Reading stored PDF {}", path.display());
    Ok(tokio::fs::read(&path).await?)
}

fn validate_file_id(file_id: &str) -> Result<()> {
    let trimmed = file_id.trim();
    let invalid = trimmed.is_empty()
        || trimmed == "."
        || trimmed == ".."
        || file_id.contains(['/', '\\', '\0']);
    if invalid {
        return Err(SourceError::InvalidId(file_id.to_string()));
    }
    Ok(())
}

/// First `limit` entry names of `dir`, sorted. Empty when unreadable.
fn list_files(dir: &Path, limit: usize) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut names: Vec<String> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names.truncate(limit);
    names
}

/// Check that `url` is an absolute http(s) URL.
pub fn parse_url(url: &str) -> Result<reqwest::Url> {
    let parsed = reqwest::Url::parse(url.trim()).map_err(|e| SourceError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(SourceError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme {:?}", other),
        }),
    }
}

/// Download a document, refusing bodies larger than `max_bytes`.
pub async fn fetch_pdf(client: &reqwest::Client, url: &str, max_bytes: usize) -> Result<Vec<u8>> {
    let parsed = parse_url(url)?;
    let fetch_error = |message: String| SourceError::Fetch {
        url: url.to_string(),
        message,
    };

    let response = client
        .get(parsed)
        .send()
        .await
        .map_err(|e| fetch_error(e.to_string()))?;

    let status = response.status();
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(SourceError::RemoteNotFound(url.to_string()));
    }
    if !status.is_success() {
        return Err(fetch_error(format!("HTTP {}", status.as_u16())));
    }

    if response.content_length().is_some_and(|len| len > max_bytes as u64) {
        return Err(SourceError::TooLarge { limit: max_bytes });
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| fetch_error(e.to_string()))?;
        if bytes.len() + chunk.len() > max_bytes {
            return Err(SourceError::TooLarge { limit: max_bytes });
        }
        bytes.extend_from_slice(&chunk);
    }

    log::info!("Fetched {} bytes from {}", bytes.len(), url);
    Ok(bytes)
}
