//! Photo uploads shared by the user, master and portfolio endpoints.
//!
//! The image arrives as the multipart field `photo`, is checked for an
//! `image/*` content type and the size cap, then written under the upload
//! directory with a generated name.

use std::path::Path;

use axum::{extract::Multipart, http::StatusCode};
use beep_core::errors::{BeepError, BeepResult};
use chrono::Utc;
use uuid::Uuid;

pub const PHOTO_FIELD: &str = "photo";
pub const MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;
pub const UPLOAD_SUBDIR: &str = "uploads";
pub const UPLOAD_URL_PREFIX: &str = "/static/uploads";

#[derive(Debug)]
pub struct PhotoUpload {
    pub content_type: String,
    pub extension: String,
    pub bytes: Vec<u8>,
}

pub fn validate_photo(content_type: Option<&str>, size: usize) -> BeepResult<()> {
    match content_type {
        Some(content_type) if content_type.starts_with("image/") => {}
        _ => {
            return Err(BeepError::Validation("File must be an image".to_string()));
        }
    }

    if size == 0 {
        return Err(BeepError::Validation("File is empty".to_string()));
    }
    if size > MAX_PHOTO_BYTES {
        return Err(BeepError::Validation("File size must not exceed 5MB".to_string()));
    }

    Ok(())
}

/// File extension (with the dot) for a stored photo.
///
/// Prefers the client's file name and falls back to the content type.
pub fn photo_extension(file_name: Option<&str>, content_type: &str) -> String {
    let from_name = file_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .filter(|ext| {
            !ext.is_empty() && ext.len() <= 5 && ext.chars().all(|c| c.is_ascii_alphanumeric())
        });

    if let Some(ext) = from_name {
        return format!(".{}", ext);
    }

    match content_type {
        "image/png" => ".png",
        "image/gif" => ".gif",
        "image/webp" => ".webp",
        _ => ".jpg",
    }
    .to_string()
}

/// `{prefix}_{owner}_{unix_ts}_{short_id}{ext}`
pub fn photo_file_name(prefix: &str, owner_id: i32, unix_ts: i64, extension: &str) -> String {
    let short_id = Uuid::new_v4().simple().to_string();
    format!("{}_{}_{}_{}{}", prefix, owner_id, unix_ts, &short_id[..8], extension)
}

pub fn photo_url(file_name: &str) -> String {
    format!("{}/{}", UPLOAD_URL_PREFIX, file_name)
}

/// Reads and validates the `photo` field of a multipart body.
pub async fn read_photo(multipart: &mut Multipart) -> BeepResult<PhotoUpload> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(err) => {
                tracing::warn!("Failed to read multipart payload: {}", err);
                return Err(match err.status() {
                    StatusCode::PAYLOAD_TOO_LARGE => {
                        BeepError::Validation("File size must not exceed 5MB".to_string())
                    }
                    _ => BeepError::Validation("Invalid multipart form data".to_string()),
                });
            }
        };

        if field.name() != Some(PHOTO_FIELD) {
            continue;
        }

        let content_type = field.content_type().map(str::to_string);
        let extension = photo_extension(field.file_name(), content_type.as_deref().unwrap_or(""));

        // Reject on the declared type before buffering the body.
        validate_photo(content_type.as_deref(), 1)?;

        let bytes = field
            .bytes()
            .await
            .map_err(|_| BeepError::Validation("File size must not exceed 5MB".to_string()))?;
        validate_photo(content_type.as_deref(), bytes.len())?;

        return Ok(PhotoUpload {
            content_type: content_type.unwrap_or_default(),
            extension,
            bytes: bytes.to_vec(),
        });
    }

    Err(BeepError::Validation("No photo uploaded".to_string()))
}

/// Writes the photo to `upload_dir` and returns its public URL.
pub async fn store_photo(
    upload_dir: &Path,
    prefix: &str,
    owner_id: i32,
    photo: &PhotoUpload,
) -> BeepResult<String> {
    tokio::fs::create_dir_all(upload_dir)
        .await
        .map_err(|e| BeepError::Internal(Box::new(e)))?;

    let file_name = photo_file_name(prefix, owner_id, Utc::now().timestamp(), &photo.extension);
    tokio::fs::write(upload_dir.join(&file_name), &photo.bytes)
        .await
        .map_err(|e| BeepError::Internal(Box::new(e)))?;

    tracing::info!(
        "Stored {} upload for {} {}: {} ({} bytes)",
        photo.content_type,
        prefix,
        owner_id,
        file_name,
        photo.bytes.len()
    );

    Ok(photo_url(&file_name))
}
