//! Axum route handler for resume uploads.

use axum::extract::Multipart;
use axum::Json;
use serde::Serialize;
use tracing::info;

use crate::documents::reader::{extract_text, SourceFormat};
use crate::errors::AppError;

const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub filename: String,
    pub format: SourceFormat,
    pub text: String,
}

/// POST /api/extract-resume
///
/// Accepts a multipart upload in the `file` field and returns its plain text,
/// ready to be sent back as `baseResume`.
pub async fn handle_extract_resume(
    mut multipart: Multipart,
) -> Result<Json<ExtractResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::Validation("Uploaded file has no filename".to_string()))?;
        let format = SourceFormat::from_filename(&filename)
            .ok_or_else(|| AppError::UnsupportedMedia(filename.clone()))?;
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;

        // PDF parsing is CPU-bound; keep it off the async workers.
        let name = filename.clone();
        let text = tokio::task::spawn_blocking(move || extract_text(&name, &bytes))
            .await
            .map_err(|e| AppError::Internal(e.into()))??;

        info!("Extracted {} chars from {filename}", text.chars().count());
        return Ok(Json(ExtractResponse {
            filename,
            format,
            text,
        }));
    }

    Err(AppError::Validation(format!(
        "Multipart field '{FILE_FIELD}' is required"
    )))
}
