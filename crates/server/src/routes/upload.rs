//! Image upload route.
//!
//! Accepts a multipart `image` field, stores it under the configured
//! upload directory with a UUID filename, and returns the public URL.
//! Unauthenticated, matching the admin client that uploads without
//! credentials.

use axum::{Json, extract::Multipart, extract::State};
use serde_json::json;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::routes::ApiResponse;
use crate::state::AppState;

/// Maximum accepted image size.
const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Store an uploaded image.
///
/// POST /api/upload
///
/// # Errors
///
/// Returns 400 for a missing `image` field, a non-image content type, or
/// a file over 5 MiB.
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<serde_json::Value>>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart payload: {e}")))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        if !content_type.starts_with("image/") {
            return Err(AppError::BadRequest(
                "Only image files are allowed".to_string(),
            ));
        }

        let extension = extension_for(field.file_name(), &content_type);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;
        if data.len() > MAX_IMAGE_BYTES {
            return Err(AppError::BadRequest(
                "Image must be at most 5 MB".to_string(),
            ));
        }

        let dir = &state.config().upload_dir;
        let filename = format!("{}.{extension}", Uuid::new_v4());
        let path = std::path::Path::new(dir).join(&filename);

        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to create upload dir: {e}")))?;
        tokio::fs::write(&path, &data)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to store upload: {e}")))?;

        tracing::info!(file = %filename, bytes = data.len(), "image uploaded");
        return Ok(ApiResponse::data(json!({
            "url": format!("/uploads/{filename}"),
        })));
    }

    Err(AppError::BadRequest("Image file is required".to_string()))
}

/// Pick a file extension from the original name, falling back to the
/// content-type subtype.
fn extension_for(file_name: Option<&str>, content_type: &str) -> String {
    let from_name = file_name
        .and_then(|name| std::path::Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()));

    from_name.unwrap_or_else(|| {
        content_type
            .strip_prefix("image/")
            .unwrap_or("bin")
            .to_lowercase()
    })
}
