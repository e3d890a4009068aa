//! Axum route handler for downloading a drafted NDA as a Word document.

use axum::{
    http::{header, HeaderValue},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::export::document::parse_document;
use crate::export::docx::{write_docx, DOCX_CONTENT_TYPE};
use crate::export::{content_disposition, export_file_name};

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    /// Contract text as returned by the draft endpoint.
    pub text: String,
    pub client_name: String,
    pub counterparty_name: String,
}

/// POST /api/v1/nda/export
///
/// Renders the drafted text into a .docx attachment named after both parties.
pub async fn handle_export(
    Json(request): Json<ExportRequest>,
) -> Result<impl IntoResponse, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    let file_name = export_file_name(&request.client_name, &request.counterparty_name);
    let disposition = HeaderValue::from_str(&content_disposition(&file_name))
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid Content-Disposition: {e}")))?;

    // Zipping is CPU-bound; keep it off the async workers.
    let text = request.text;
    let bytes = tokio::task::spawn_blocking(move || {
        let document = parse_document(&text);
        write_docx(&document, Utc::now())
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Export task failed: {e}")))??;

    info!("Exported {} ({} bytes)", file_name, bytes.len());

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(DOCX_CONTENT_TYPE)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    ))
}
