use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use beep_core::{
    errors::BeepError,
    models::user::{AuthResponse, LoginRequest, RegisterRequest},
};

use crate::{
    ApiState,
    handlers::required,
    middleware::{
        auth::{hash_password, issue_token, verify_password},
        error_handling::{AppError, conflict_or_database},
    },
};

pub const MIN_PASSWORD_LENGTH: usize = 6;

#[axum::debug_handler]
pub async fn register(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let name = required(&payload.name, "Name")?;
    let email = required(&payload.email, "Email")?.to_lowercase();
    if !email.contains('@') {
        return Err(BeepError::Validation("Invalid email".to_string()).into());
    }
    if payload.password.len() < MIN_PASSWORD_LENGTH {
        return Err(BeepError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        ))
        .into());
    }

    let password_hash = hash_password(&payload.password).map_err(BeepError::Database)?;

    let user = beep_db::repositories::user::create_user(
        &state.db_pool,
        &name,
        &email,
        payload.phone.as_deref().map(str::trim).filter(|p| !p.is_empty()),
        &password_hash,
    )
    .await
    .map_err(|e| conflict_or_database(e, "User with this email already exists"))?;

    tracing::info!("User registered: id={}", user.id);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token: issue_token(&user.email),
            user: user.into(),
        }),
    ))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let email = payload.email.trim().to_lowercase();
    let invalid = || BeepError::Authentication("Invalid email or password".to_string());

    let user = beep_db::repositories::user::get_user_by_email(&state.db_pool, &email)
        .await
        .map_err(BeepError::Database)?
        .ok_or_else(invalid)?;

    if !verify_password(&payload.password, &user.password_hash) {
        return Err(invalid().into());
    }

    Ok(Json(AuthResponse {
        token: issue_token(&user.email),
        user: user.into(),
    }))
}
