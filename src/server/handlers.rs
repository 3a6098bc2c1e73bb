use axum::{
    extract::{Multipart, State, multipart::MultipartError},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use tracing::{info, warn};

use super::{AppState, MAX_FILE_SIZE};
use crate::csv_io::enrich_csv;

const UPLOAD_FIELD: &str = "csvFile";
const INDEX_HTML: &str = include_str!("index.html");

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("No file uploaded")]
    MissingFile,
    #[error("Only CSV files allowed")]
    NotCsv,
    #[error("File too large")]
    TooLarge,
    #[error("{0}")]
    Multipart(#[from] MultipartError),
    #[error(transparent)]
    Input(#[from] crate::Error),
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::TooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Multipart(err) => err.status(),
            Self::MissingFile | Self::NotCsv | Self::Input(_) => StatusCode::BAD_REQUEST,
        };
        let body = match self {
            Self::Multipart(err) => err.body_text(),
            other => other.to_string(),
        };
        (status, body).into_response()
    }
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn upload(State(state): State<AppState>, multipart: Multipart) -> Response {
    match handle_upload(&state, multipart).await {
        Ok(csv) => (
            [
                (header::CONTENT_TYPE, "text/csv"),
                (header::CONTENT_DISPOSITION, "attachment; filename=result.csv"),
            ],
            csv,
        )
            .into_response(),
        Err(err) => {
            warn!(error = %err, "upload rejected");
            err.into_response()
        }
    }
}

async fn handle_upload(state: &AppState, multipart: Multipart) -> Result<Vec<u8>, UploadError> {
    let bytes = read_csv_field(multipart).await?;
    info!(bytes = bytes.len(), "processing upload");
    let csv = enrich_csv(&bytes, state.lookup.as_ref(), &state.rules, &state.options).await?;
    Ok(csv)
}

async fn read_csv_field(mut multipart: Multipart) -> Result<Vec<u8>, UploadError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_ascii_lowercase();
        if !file_name.ends_with(".csv") {
            return Err(UploadError::NotCsv);
        }
        let bytes = field.bytes().await?;
        if bytes.len() > MAX_FILE_SIZE {
            return Err(UploadError::TooLarge);
        }
        return Ok(bytes.to_vec());
    }
    Err(UploadError::MissingFile)
}
