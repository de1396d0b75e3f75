//! The caller's own garage, separate from the reference car catalog.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use beep_core::{
    errors::BeepError,
    models::{
        account::{UserCar, UserCarRequest},
        appointment::MessageResponse,
    },
};
use beep_db::repositories::user_car;

use crate::{
    ApiState,
    handlers::{parse_id, required},
    middleware::{auth::AuthUser, error_handling::AppError},
};

fn car_not_found(id: i32) -> BeepError {
    BeepError::NotFound(format!("Car with ID {} not found", id))
}

fn normalized_comment(comment: Option<&str>) -> Option<&str> {
    comment.map(str::trim).filter(|comment| !comment.is_empty())
}

#[axum::debug_handler]
pub async fn list_cars(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
) -> Result<Json<Vec<UserCar>>, AppError> {
    let cars = user_car::get_user_cars(&state.db_pool, user.id)
        .await
        .map_err(BeepError::Database)?;

    Ok(Json(cars.into_iter().map(UserCar::from).collect()))
}

#[axum::debug_handler]
pub async fn create_car(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Json(payload): Json<UserCarRequest>,
) -> Result<(StatusCode, Json<UserCar>), AppError> {
    let name = required(&payload.name, "Name")?;

    let created = user_car::create_user_car(
        &state.db_pool,
        user.id,
        &name,
        payload.year,
        normalized_comment(payload.comment.as_deref()),
    )
    .await
    .map_err(BeepError::Database)?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

#[axum::debug_handler]
pub async fn update_car(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UserCarRequest>,
) -> Result<Json<UserCar>, AppError> {
    let car_id = parse_id(&id, "car")?;
    let name = required(&payload.name, "Name")?;

    let updated = user_car::update_user_car(
        &state.db_pool,
        car_id,
        user.id,
        &name,
        payload.year,
        normalized_comment(payload.comment.as_deref()),
    )
    .await
    .map_err(BeepError::Database)?
    .ok_or_else(|| car_not_found(car_id))?;

    Ok(Json(updated.into()))
}

#[axum::debug_handler]
pub async fn delete_car(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let car_id = parse_id(&id, "car")?;

    let deleted = user_car::delete_user_car(&state.db_pool, car_id, user.id)
        .await
        .map_err(BeepError::Database)?;

    if !deleted {
        return Err(car_not_found(car_id).into());
    }

    Ok(Json(MessageResponse::new("Car deleted successfully")))
}
