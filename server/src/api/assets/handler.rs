//! Asset upload handlers

use std::path::Path as FsPath;

use axum::{
    Json,
    extract::{Extension, Multipart, Path, State},
};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{AppError, AppResponse, AppResult, ok_with_message};

/// Maximum file size (5MB)
const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Accepted upload extensions
const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "pdf"];

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub filename: String,
    pub original_name: String,
    pub size: usize,
    pub url: String,
}

fn extension_of(filename: &str) -> Option<String> {
    FsPath::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

fn validate_upload(data: &[u8], ext: &str) -> Result<(), AppError> {
    if data.is_empty() {
        return Err(AppError::validation("Uploaded file is empty"));
    }
    if data.len() > MAX_FILE_SIZE {
        return Err(AppError::validation(format!(
            "File too large. Maximum size is {}MB",
            MAX_FILE_SIZE / 1024 / 1024
        )));
    }
    if !SUPPORTED_EXTENSIONS.contains(&ext) {
        return Err(AppError::validation(format!(
            "Unsupported file type .{}, expected one of: {}",
            ext,
            SUPPORTED_EXTENSIONS.join(", ")
        )));
    }
    Ok(())
}

/// POST /api/assets/upload - store a file from a multipart form
pub async fn upload(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    mut multipart: Multipart,
) -> AppResult<Json<AppResponse<UploadResponse>>> {
    let field = multipart
        .next_field()
        .await?
        .ok_or_else(|| AppError::validation("Missing file field"))?;

    let original_name = field
        .file_name()
        .map(|s| s.to_string())
        .ok_or_else(|| AppError::validation("Missing filename"))?;
    let ext = extension_of(&original_name)
        .ok_or_else(|| AppError::validation("Filename has no extension"))?;

    let data = field.bytes().await?;
    validate_upload(&data, &ext)?;

    let upload_dir = state.upload_dir();
    tokio::fs::create_dir_all(&upload_dir)
        .await
        .map_err(|e| AppError::internal(format!("Failed to create upload dir: {}", e)))?;

    let filename = format!("{}.{}", Uuid::new_v4(), ext);
    let file_path = upload_dir.join(&filename);
    tokio::fs::write(&file_path, &data)
        .await
        .map_err(|e| AppError::internal(format!("Failed to write file: {}", e)))?;

    tracing::info!(
        filename = %filename,
        original_name = %original_name,
        size = data.len(),
        operator_id = %current_user.id,
        "Asset uploaded"
    );

    Ok(ok_with_message(
        UploadResponse {
            url: format!("/api/assets/files/{}", filename),
            filename,
            original_name,
            size: data.len(),
        },
        "File uploaded",
    ))
}

/// DELETE /api/assets/:filename - remove a stored file
pub async fn delete(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(filename): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    // Prevent path traversal
    if filename.is_empty()
        || filename.contains("..")
        || filename.contains('/')
        || filename.contains('\\')
    {
        return Err(AppError::validation("Invalid filename"));
    }

    let file_path = state.upload_dir().join(&filename);
    match tokio::fs::remove_file(&file_path).await {
        Ok(()) => {
            tracing::info!(
                filename = %filename,
                operator_id = %current_user.id,
                "Asset deleted"
            );
            Ok(ok_with_message((), "File deleted"))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(AppError::not_found(format!("File {}", filename)))
        }
        Err(e) => Err(AppError::internal(format!("Failed to delete file: {}", e))),
    }
}
