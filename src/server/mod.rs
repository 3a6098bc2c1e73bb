//! HTTP upload boundary (`with-server` feature).
//!
//! `GET /` serves the upload form, `POST /upload` takes a multipart
//! `csvFile` field and answers with the enriched CSV as `result.csv`.

mod handlers;
mod state;

use std::any::Any;
use std::net::SocketAddr;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use tracing::{error, info};

pub use handlers::UploadError;
pub use state::AppState;

/// Largest accepted CSV upload.
pub const MAX_FILE_SIZE: usize = 2 * 1024 * 1024;
// multipart boundaries and part headers on top of the file itself
const MULTIPART_OVERHEAD: usize = 16 * 1024;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/upload", post(handlers::upload))
        .layer(DefaultBodyLimit::max(MAX_FILE_SIZE + MULTIPART_OVERHEAD))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "server listening");
    axum::serve(listener, router(state)).await
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    error!(detail, "request handler panicked");
    (StatusCode::INTERNAL_SERVER_ERROR, "Something broke!").into_response()
}
