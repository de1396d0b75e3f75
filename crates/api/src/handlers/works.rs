//! Portfolio entries of the caller's master profile.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use beep_core::{
    errors::BeepError,
    models::{
        appointment::MessageResponse,
        clock::parse_date,
        master::{MasterWork, MasterWorkRequest},
        user::PhotoUploadResponse,
    },
};
use beep_db::repositories::work;
use chrono::NaiveDate;

use crate::{
    ApiState,
    handlers::{master_profile::require_master, parse_id, required, upload},
    middleware::{auth::AuthUser, error_handling::AppError},
};

/// A work request with its text fields trimmed and its date parsed.
struct ValidWork {
    title: String,
    work_date: NaiveDate,
    customer_name: String,
    amount: f64,
}

fn validate_work(payload: &MasterWorkRequest) -> Result<ValidWork, BeepError> {
    let title = required(&payload.title, "Title")?;
    let customer_name = required(&payload.customer_name, "Customer name")?;
    let work_date = parse_date(&payload.work_date)?;

    if !payload.amount.is_finite() || payload.amount < 0.0 {
        return Err(BeepError::Validation("Amount must not be negative".to_string()));
    }

    Ok(ValidWork {
        title,
        work_date,
        customer_name,
        amount: payload.amount,
    })
}

fn work_not_found(id: i32) -> BeepError {
    BeepError::NotFound(format!("Work with ID {} not found", id))
}

#[axum::debug_handler]
pub async fn list_works(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
) -> Result<Json<Vec<MasterWork>>, AppError> {
    let master = require_master(&state, &user).await?;

    let works = work::get_master_works(&state.db_pool, master.id)
        .await
        .map_err(BeepError::Database)?;

    Ok(Json(works.into_iter().map(MasterWork::from).collect()))
}

#[axum::debug_handler]
pub async fn create_work(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Json(payload): Json<MasterWorkRequest>,
) -> Result<(StatusCode, Json<MasterWork>), AppError> {
    let valid = validate_work(&payload)?;
    let master = require_master(&state, &user).await?;

    let created = work::create_master_work(
        &state.db_pool,
        master.id,
        &valid.title,
        valid.work_date,
        &valid.customer_name,
        valid.amount,
        &payload.photo_urls,
    )
    .await
    .map_err(BeepError::Database)?;

    tracing::info!("Work created: id={}, master_id={}", created.id, master.id);
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[axum::debug_handler]
pub async fn get_work(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MasterWork>, AppError> {
    let work_id = parse_id(&id, "work")?;
    let master = require_master(&state, &user).await?;

    let found = work::get_master_work(&state.db_pool, work_id, master.id)
        .await
        .map_err(BeepError::Database)?
        .ok_or_else(|| work_not_found(work_id))?;

    Ok(Json(found.into()))
}

#[axum::debug_handler]
pub async fn update_work(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<MasterWorkRequest>,
) -> Result<Json<MasterWork>, AppError> {
    let work_id = parse_id(&id, "work")?;
    let valid = validate_work(&payload)?;
    let master = require_master(&state, &user).await?;

    let updated = work::update_master_work(
        &state.db_pool,
        work_id,
        master.id,
        &valid.title,
        valid.work_date,
        &valid.customer_name,
        valid.amount,
        &payload.photo_urls,
    )
    .await
    .map_err(BeepError::Database)?
    .ok_or_else(|| work_not_found(work_id))?;

    Ok(Json(updated.into()))
}

#[axum::debug_handler]
pub async fn delete_work(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let work_id = parse_id(&id, "work")?;
    let master = require_master(&state, &user).await?;

    let deleted = work::delete_master_work(&state.db_pool, work_id, master.id)
        .await
        .map_err(BeepError::Database)?;

    if !deleted {
        return Err(work_not_found(work_id).into());
    }

    Ok(Json(MessageResponse::new("Work deleted successfully")))
}

/// Stores a work photo and returns its URL; the caller attaches it to a
/// work entry afterwards.
#[axum::debug_handler]
pub async fn upload_work_photo(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<PhotoUploadResponse>, AppError> {
    let master = require_master(&state, &user).await?;
    let photo = upload::read_photo(&mut multipart).await?;
    let photo_url = upload::store_photo(&state.upload_dir(), "work", master.id, &photo).await?;

    Ok(Json(PhotoUploadResponse {
        message: "Photo uploaded successfully".to_string(),
        photo_url,
    }))
}
