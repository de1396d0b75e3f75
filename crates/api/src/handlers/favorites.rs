use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use beep_core::{
    errors::BeepError,
    models::{account::FavoriteMasterRequest, appointment::MessageResponse, master::Master},
};
use beep_db::repositories::{favorite, master};

use crate::{
    ApiState,
    handlers::parse_id,
    middleware::{auth::AuthUser, error_handling::AppError},
};

#[axum::debug_handler]
pub async fn list_favorites(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
) -> Result<Json<Vec<Master>>, AppError> {
    let masters = favorite::get_favorite_masters(&state.db_pool, user.id)
        .await
        .map_err(BeepError::Database)?;

    Ok(Json(masters.into_iter().map(Master::from).collect()))
}

/// Adding an existing favorite again is a no-op.
#[axum::debug_handler]
pub async fn add_favorite(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Json(payload): Json<FavoriteMasterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    if payload.master_id <= 0 {
        return Err(BeepError::Validation("Invalid master ID".to_string()).into());
    }

    master::get_master_by_id(&state.db_pool, payload.master_id)
        .await
        .map_err(BeepError::Database)?
        .ok_or_else(|| {
            BeepError::NotFound(format!("Master with ID {} not found", payload.master_id))
        })?;

    favorite::add_favorite(&state.db_pool, user.id, payload.master_id)
        .await
        .map_err(BeepError::Database)?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Master added to favorites")),
    ))
}

#[axum::debug_handler]
pub async fn remove_favorite(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Path(master_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let master_id = parse_id(&master_id, "master")?;

    let removed = favorite::remove_favorite(&state.db_pool, user.id, master_id)
        .await
        .map_err(BeepError::Database)?;

    if !removed {
        return Err(BeepError::NotFound("Master is not in favorites".to_string()).into());
    }

    Ok(Json(MessageResponse::new("Master removed from favorites")))
}
