//! # Own master profile
//!
//! Endpoints under `/master` act on the master profile owned by the calling
//! user. A caller without a profile gets 404 everywhere except on creation.

use std::{collections::HashSet, sync::Arc};

use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
};
use beep_core::{
    availability::is_valid_day_of_week,
    errors::BeepError,
    models::{
        appointment::{MasterAppointment, MessageResponse},
        master::{
            CreateMasterRequest, Master, MasterPaymentInfo, MasterSchedule, ReviewWithUser,
            ScheduleEntryRequest, UpdateMasterRequest, UpdatePaymentInfoRequest,
        },
        user::PhotoUploadResponse,
    },
};
use beep_db::{
    models::DbMaster,
    repositories::{appointment, master, payment, review, schedule},
};

use crate::{
    ApiState,
    handlers::{required, upload},
    middleware::{
        auth::AuthUser,
        error_handling::{AppError, conflict_or_database},
    },
};

/// The master profile owned by `user`.
pub(crate) async fn require_master(
    state: &ApiState,
    user: &AuthUser,
) -> Result<DbMaster, BeepError> {
    master::get_master_by_user_id(&state.db_pool, user.id)
        .await
        .map_err(BeepError::Database)?
        .ok_or_else(|| BeepError::NotFound("Master profile not found".to_string()))
}

#[axum::debug_handler]
pub async fn get_profile(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
) -> Result<Json<Master>, AppError> {
    Ok(Json(require_master(&state, &user).await?.into()))
}

#[axum::debug_handler]
pub async fn create_profile(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Json(payload): Json<CreateMasterRequest>,
) -> Result<(StatusCode, Json<Master>), AppError> {
    let name = required(&payload.name, "Name")?;
    let email = required(&payload.email, "Email")?.to_lowercase();
    let phone = required(&payload.phone, "Phone")?;

    let created = master::create_master(
        &state.db_pool,
        user.id,
        &name,
        &email,
        &phone,
        payload.specialization.as_deref(),
        payload.address.as_deref(),
    )
    .await
    .map_err(|e| conflict_or_database(e, "Master profile already exists for this user or email"))?;

    tracing::info!("Master profile created: id={}, user_id={}", created.id, user.id);
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[axum::debug_handler]
pub async fn update_profile(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Json(payload): Json<UpdateMasterRequest>,
) -> Result<Json<Master>, AppError> {
    let current = require_master(&state, &user).await?;

    let name = match payload.name.as_deref() {
        Some(name) => required(name, "Name")?,
        None => current.name,
    };
    let email = match payload.email.as_deref() {
        Some(email) => required(email, "Email")?.to_lowercase(),
        None => current.email,
    };
    let phone = match payload.phone.as_deref() {
        Some(phone) => required(phone, "Phone")?,
        None => current.phone,
    };
    let specialization = payload.specialization.or(current.specialization);
    let address = payload.address.or(current.address);

    let updated = master::update_master(
        &state.db_pool,
        current.id,
        &name,
        &email,
        &phone,
        specialization.as_deref(),
        address.as_deref(),
    )
    .await
    .map_err(|e| conflict_or_database(e, "Email is already used by another master"))?
    .ok_or_else(|| BeepError::NotFound("Master profile not found".to_string()))?;

    Ok(Json(updated.into()))
}

#[axum::debug_handler]
pub async fn delete_profile(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
) -> Result<Json<MessageResponse>, AppError> {
    let deleted = master::delete_master_by_user_id(&state.db_pool, user.id)
        .await
        .map_err(BeepError::Database)?;

    if !deleted {
        return Err(BeepError::NotFound("Master profile not found".to_string()).into());
    }

    Ok(Json(MessageResponse::new("Master profile deleted successfully")))
}

#[axum::debug_handler]
pub async fn upload_photo(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<PhotoUploadResponse>, AppError> {
    let current = require_master(&state, &user).await?;
    let photo = upload::read_photo(&mut multipart).await?;
    let photo_url = upload::store_photo(&state.upload_dir(), "master", current.id, &photo).await?;

    master::update_master_photo(&state.db_pool, current.id, &photo_url)
        .await
        .map_err(BeepError::Database)?;

    Ok(Json(PhotoUploadResponse {
        message: "Photo uploaded successfully".to_string(),
        photo_url,
    }))
}

#[axum::debug_handler]
pub async fn get_schedule(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
) -> Result<Json<Vec<MasterSchedule>>, AppError> {
    let current = require_master(&state, &user).await?;

    let entries = schedule::get_master_schedule(&state.db_pool, current.id)
        .await
        .map_err(BeepError::Database)?;

    Ok(Json(entries.into_iter().map(MasterSchedule::from).collect()))
}

/// Checks a full weekly schedule before it replaces the stored one.
pub fn validate_schedule(entries: &[ScheduleEntryRequest]) -> Result<(), BeepError> {
    let mut seen = HashSet::new();
    for entry in entries {
        if !is_valid_day_of_week(entry.day_of_week) {
            return Err(BeepError::Validation(format!(
                "Invalid day_of_week {}. Use 0 (Sunday) to 6 (Saturday)",
                entry.day_of_week
            )));
        }
        if entry.start_time >= entry.end_time {
            return Err(BeepError::Validation(format!(
                "start_time must be before end_time for day {}",
                entry.day_of_week
            )));
        }
        if !seen.insert(entry.day_of_week) {
            return Err(BeepError::Validation(format!(
                "Duplicate schedule entry for day {}",
                entry.day_of_week
            )));
        }
    }
    Ok(())
}

#[axum::debug_handler]
pub async fn update_schedule(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Json(entries): Json<Vec<ScheduleEntryRequest>>,
) -> Result<Json<Vec<MasterSchedule>>, AppError> {
    validate_schedule(&entries)?;
    let current = require_master(&state, &user).await?;

    let saved = schedule::replace_master_schedule(&state.db_pool, current.id, &entries)
        .await
        .map_err(BeepError::Database)?;

    tracing::info!("Schedule replaced: master_id={}, days={}", current.id, saved.len());
    Ok(Json(saved.into_iter().map(MasterSchedule::from).collect()))
}

#[axum::debug_handler]
pub async fn get_payment_info(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
) -> Result<Json<MasterPaymentInfo>, AppError> {
    let current = require_master(&state, &user).await?;

    let info = payment::get_payment_info(&state.db_pool, current.id)
        .await
        .map_err(BeepError::Database)?
        .ok_or_else(|| BeepError::NotFound("Payment info not found".to_string()))?;

    Ok(Json(info.into()))
}

/// Strips spaces and dashes; a non-empty card number must be 16 digits.
pub fn normalize_card(card: Option<&str>) -> Result<Option<String>, BeepError> {
    let Some(card) = card else {
        return Ok(None);
    };

    let digits: String = card.chars().filter(|c| !matches!(c, ' ' | '-')).collect();
    if digits.is_empty() {
        return Ok(None);
    }
    if digits.len() != 16 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(BeepError::Validation(
            "Card number must contain 16 digits".to_string(),
        ));
    }
    Ok(Some(digits))
}

#[axum::debug_handler]
pub async fn update_payment_info(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Json(payload): Json<UpdatePaymentInfoRequest>,
) -> Result<Json<MasterPaymentInfo>, AppError> {
    let kaspi = normalize_card(payload.kaspi_card.as_deref())?;
    let freedom = normalize_card(payload.freedom_card.as_deref())?;
    let halyk = normalize_card(payload.halyk_card.as_deref())?;

    let current = require_master(&state, &user).await?;

    let info = payment::upsert_payment_info(
        &state.db_pool,
        current.id,
        kaspi.as_deref(),
        freedom.as_deref(),
        halyk.as_deref(),
    )
    .await
    .map_err(BeepError::Database)?;

    Ok(Json(info.into()))
}

#[axum::debug_handler]
pub async fn get_own_reviews(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
) -> Result<Json<Vec<ReviewWithUser>>, AppError> {
    let current = require_master(&state, &user).await?;

    let reviews = review::get_master_reviews(&state.db_pool, current.id)
        .await
        .map_err(BeepError::Database)?;

    Ok(Json(reviews.into_iter().map(ReviewWithUser::from).collect()))
}

/// Appointments booked with the caller's master profile, newest first.
#[axum::debug_handler]
pub async fn get_notifications(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
) -> Result<Json<Vec<MasterAppointment>>, AppError> {
    let current = require_master(&state, &user).await?;

    let appointments = appointment::get_master_appointments(&state.db_pool, current.id)
        .await
        .map_err(BeepError::Database)?
        .into_iter()
        .map(MasterAppointment::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(BeepError::Database)?;

    Ok(Json(appointments))
}
