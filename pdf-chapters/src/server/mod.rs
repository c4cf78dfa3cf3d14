//! HTTP API server.

mod error;
mod extract;
mod handlers;
mod state;

pub use state::AppState;

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = state.config.max_upload_bytes();

    Router::new()
        .route("/", get(handlers::root))
        .route("/process-pdf/", post(handlers::process_pdf))
        .route("/process-pdf-by-id/", post(handlers::process_pdf_by_id))
        .route("/process-pdf-url/", post(handlers::process_pdf_url))
        .route("/text-to-speech/", post(handlers::text_to_speech))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .with_state(state)
}

/// Serve until Ctrl-C.
pub async fn serve(state: AppState) -> Result<()> {
    let addr = state.config.listen_addr();
    log::info!(
        "Uploads directory: {}, audio directory: {}",
        state.config.uploads_dir.display(),
        state.config.audio_dir.display()
    );

    let app = create_router(state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    log::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::error!("Failed to listen for shutdown signal: {}", e);
                std::future::pending::<()>().await;
            }
            log::info!("Shutting down");
        })
        .await
        .context("HTTP server error")?;

    Ok(())
}
