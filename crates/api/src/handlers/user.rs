//! The caller's own account: profile, photo, guarantees and notifications.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Multipart, Path, State},
};
use beep_core::{
    errors::BeepError,
    models::{
        account::{GuaranteeWithDetails, Notification},
        appointment::MessageResponse,
        user::{PhotoUploadResponse, UpdateProfileRequest, User},
    },
};
use beep_db::repositories::{guarantee, notification, user as users};
use chrono::Utc;

use crate::{
    ApiState,
    handlers::{parse_id, required, upload},
    middleware::{
        auth::AuthUser,
        error_handling::{AppError, conflict_or_database},
    },
};

fn user_not_found() -> BeepError {
    BeepError::NotFound("User not found".to_string())
}

#[axum::debug_handler]
pub async fn get_profile(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
) -> Result<Json<User>, AppError> {
    let profile = users::get_user_by_id(&state.db_pool, user.id)
        .await
        .map_err(BeepError::Database)?
        .ok_or_else(user_not_found)?;

    Ok(Json(profile.into()))
}

/// Omitted fields keep their stored values; an empty phone clears it.
#[axum::debug_handler]
pub async fn update_profile(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<User>, AppError> {
    let current = users::get_user_by_id(&state.db_pool, user.id)
        .await
        .map_err(BeepError::Database)?
        .ok_or_else(user_not_found)?;

    let name = match payload.name.as_deref() {
        Some(name) => required(name, "Name")?,
        None => current.name,
    };
    let email = match payload.email.as_deref() {
        Some(email) => {
            let email = required(email, "Email")?.to_lowercase();
            if !email.contains('@') {
                return Err(BeepError::Validation("Invalid email".to_string()).into());
            }
            email
        }
        None => current.email,
    };
    let phone = match payload.phone {
        Some(phone) => Some(phone.trim().to_string()).filter(|p| !p.is_empty()),
        None => current.phone,
    };

    let updated =
        users::update_user_profile(&state.db_pool, user.id, &name, &email, phone.as_deref())
            .await
            .map_err(|e| conflict_or_database(e, "User with this email already exists"))?
            .ok_or_else(user_not_found)?;

    Ok(Json(updated.into()))
}

#[axum::debug_handler]
pub async fn upload_photo(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<PhotoUploadResponse>, AppError> {
    let photo = upload::read_photo(&mut multipart).await?;
    let photo_url = upload::store_photo(&state.upload_dir(), "user", user.id, &photo).await?;

    let updated = users::update_user_photo(&state.db_pool, user.id, &photo_url)
        .await
        .map_err(BeepError::Database)?;
    if !updated {
        return Err(user_not_found().into());
    }

    Ok(Json(PhotoUploadResponse {
        message: "Photo uploaded successfully".to_string(),
        photo_url,
    }))
}

/// Guarantees that have not expired yet, soonest expiry first.
#[axum::debug_handler]
pub async fn list_guarantees(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
) -> Result<Json<Vec<GuaranteeWithDetails>>, AppError> {
    let today = Utc::now().date_naive();

    let guarantees = guarantee::get_active_guarantees(&state.db_pool, user.id, today)
        .await
        .map_err(BeepError::Database)?;

    Ok(Json(guarantees.into_iter().map(GuaranteeWithDetails::from).collect()))
}

#[axum::debug_handler]
pub async fn list_notifications(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
) -> Result<Json<Vec<Notification>>, AppError> {
    let notifications = notification::get_user_notifications(&state.db_pool, user.id)
        .await
        .map_err(BeepError::Database)?;

    Ok(Json(notifications.into_iter().map(Notification::from).collect()))
}

#[axum::debug_handler]
pub async fn mark_notification_read(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let notification_id = parse_id(&id, "notification")?;

    let marked = notification::mark_notification_read(&state.db_pool, notification_id, user.id)
        .await
        .map_err(BeepError::Database)?;

    if !marked {
        return Err(BeepError::NotFound(format!(
            "Notification with ID {} not found",
            notification_id
        ))
        .into());
    }

    Ok(Json(MessageResponse::new("Notification marked as read")))
}
