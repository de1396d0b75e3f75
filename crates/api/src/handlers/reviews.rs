use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use beep_core::{
    errors::BeepError,
    models::master::{CreateReviewRequest, MAX_REVIEW_RATING, MIN_REVIEW_RATING, Review},
};
use beep_db::repositories::{master, review};

use crate::{
    ApiState,
    middleware::{auth::AuthUser, error_handling::AppError},
};

pub fn validate_review(payload: &CreateReviewRequest) -> Result<(), BeepError> {
    if payload.master_id <= 0 {
        return Err(BeepError::Validation("master_id is required".to_string()));
    }
    if !(MIN_REVIEW_RATING..=MAX_REVIEW_RATING).contains(&payload.rating) {
        return Err(BeepError::Validation(format!(
            "Rating must be between {} and {}",
            MIN_REVIEW_RATING, MAX_REVIEW_RATING
        )));
    }
    Ok(())
}

/// Stores a review and refreshes the master's average rating.
#[axum::debug_handler]
pub async fn create_review(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Json(payload): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<Review>), AppError> {
    validate_review(&payload)?;

    master::get_master_by_id(&state.db_pool, payload.master_id)
        .await
        .map_err(BeepError::Database)?
        .ok_or_else(|| {
            BeepError::NotFound(format!("Master with ID {} not found", payload.master_id))
        })?;

    let comment = payload
        .comment
        .as_deref()
        .map(str::trim)
        .filter(|comment| !comment.is_empty());

    let created = review::create_review(
        &state.db_pool,
        payload.master_id,
        user.id,
        payload.rating,
        comment,
    )
    .await
    .map_err(BeepError::Database)?;

    tracing::info!(
        "Review created: id={}, master_id={}, rating={}",
        created.id,
        created.master_id,
        created.rating
    );

    Ok((StatusCode::CREATED, Json(created.into())))
}
