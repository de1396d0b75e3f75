pub mod appointments;
pub mod auth;
pub mod catalog;
pub mod health;
pub mod master;
pub mod masters;
pub mod user;

use axum::extract::DefaultBodyLimit;

use crate::handlers::upload::MAX_PHOTO_BYTES;

/// Prefix shared by every route except the health checks.
pub const API_PREFIX: &str = "/api/v1";

/// Body limit for photo uploads: the image cap plus room for multipart framing.
pub fn photo_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(MAX_PHOTO_BYTES + 64 * 1024)
}
