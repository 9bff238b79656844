use std::path::Path as FsPath;

use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::documents::repository::{
    get_document, insert_document, list_documents, soft_delete_document,
};
use crate::documents::storage::{is_pdf, save_upload};
use crate::errors::AppError;
use crate::models::document::DocumentRow;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub pdf_id: i32,
    pub filename: String,
}

#[derive(Debug, Serialize)]
pub struct UploadedDocument {
    pub pdf_id: i32,
    pub filename: String,
}

#[derive(Debug, Serialize)]
pub struct UploadManyResponse {
    pub message: String,
    pub pdfs: Vec<UploadedDocument>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    100
}

/// POST /api/v1/pdfs/upload
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let Some(original) = field.file_name().map(str::to_string) else {
            continue;
        };
        let content = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;

        let row = store_document(&state, &original, content).await?;
        return Ok(Json(UploadResponse {
            message: "PDF uploaded successfully".to_string(),
            pdf_id: row.id,
            filename: row.filename,
        }));
    }

    Err(AppError::Validation("No file in request".to_string()))
}

/// POST /api/v1/pdfs/upload-multiple
pub async fn handle_upload_multiple(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadManyResponse>, AppError> {
    let mut pdfs = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let Some(original) = field.file_name().map(str::to_string) else {
            continue;
        };
        let content = match field.bytes().await {
            Ok(content) => content,
            Err(e) => {
                error!(filename = %original, error = %e, "Error reading uploaded document");
                continue;
            }
        };

        match store_document(&state, &original, content).await {
            Ok(row) => pdfs.push(UploadedDocument {
                pdf_id: row.id,
                filename: row.filename,
            }),
            Err(e) => error!(filename = %original, error = %e, "Error uploading document"),
        }
    }

    Ok(Json(UploadManyResponse {
        message: format!("Successfully uploaded {} PDFs", pdfs.len()),
        pdfs,
    }))
}

/// GET /api/v1/pdfs
pub async fn handle_list(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<DocumentRow>>, AppError> {
    let rows = list_documents(&state.db, page.skip.max(0), page.limit.clamp(0, 1000)).await?;
    Ok(Json(rows))
}

/// GET /api/v1/pdfs/:id
pub async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<DocumentRow>, AppError> {
    let row = get_document(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("PDF not found".to_string()))?;
    Ok(Json(row))
}

/// DELETE /api/v1/pdfs/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, AppError> {
    if !soft_delete_document(&state.db, id).await? {
        return Err(AppError::NotFound("PDF not found".to_string()));
    }
    info!(pdf_id = id, "Soft-deleted document");
    Ok(Json(MessageResponse {
        message: "PDF deleted successfully".to_string(),
    }))
}

async fn store_document(
    state: &AppState,
    original: &str,
    content: Bytes,
) -> Result<DocumentRow, AppError> {
    if !is_pdf(original) {
        warn!(filename = %original, "Rejected upload with unsupported format");
        return Err(AppError::Validation(
            "Only PDF files are supported".to_string(),
        ));
    }

    let stored = save_upload(FsPath::new(&state.config.upload_dir), original, content).await?;
    let row = insert_document(&state.db, &stored.filename, &stored.filepath).await?;
    info!(pdf_id = row.id, filename = %row.filename, "Uploaded document");
    Ok(row)
}
