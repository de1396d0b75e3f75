//! Public master directory.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use beep_core::{
    errors::BeepError,
    models::master::{Master, MasterSchedule, MasterSummary, ReviewWithUser, VerificationStatus},
};
use beep_db::repositories::{master, review, schedule};

use crate::{
    ApiState,
    handlers::parse_id,
    middleware::{auth::OptionalAuthUser, error_handling::AppError},
};

async fn ensure_master_exists(state: &ApiState, master_id: i32) -> Result<Master, BeepError> {
    master::get_master_by_id(&state.db_pool, master_id)
        .await
        .map_err(BeepError::Database)?
        .map(Master::from)
        .ok_or_else(|| BeepError::NotFound(format!("Master with ID {} not found", master_id)))
}

/// Best rated first. `is_favorite` is only ever true for an authenticated caller.
#[axum::debug_handler]
pub async fn list_masters(
    State(state): State<Arc<ApiState>>,
    OptionalAuthUser(viewer): OptionalAuthUser,
) -> Result<Json<Vec<MasterSummary>>, AppError> {
    let masters = master::get_all_masters(&state.db_pool, viewer.map(|user| user.id))
        .await
        .map_err(BeepError::Database)?;

    Ok(Json(masters.into_iter().map(MasterSummary::from).collect()))
}

#[axum::debug_handler]
pub async fn get_master(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<Master>, AppError> {
    let master_id = parse_id(&id, "master")?;
    Ok(Json(ensure_master_exists(&state, master_id).await?))
}

#[axum::debug_handler]
pub async fn get_master_reviews(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<ReviewWithUser>>, AppError> {
    let master_id = parse_id(&id, "master")?;
    ensure_master_exists(&state, master_id).await?;

    let reviews = review::get_master_reviews(&state.db_pool, master_id)
        .await
        .map_err(BeepError::Database)?;

    Ok(Json(reviews.into_iter().map(ReviewWithUser::from).collect()))
}

#[axum::debug_handler]
pub async fn get_master_schedule(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<MasterSchedule>>, AppError> {
    let master_id = parse_id(&id, "master")?;
    ensure_master_exists(&state, master_id).await?;

    let entries = schedule::get_master_schedule(&state.db_pool, master_id)
        .await
        .map_err(BeepError::Database)?;

    Ok(Json(entries.into_iter().map(MasterSchedule::from).collect()))
}

#[axum::debug_handler]
pub async fn get_master_verification(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<VerificationStatus>, AppError> {
    let master_id = parse_id(&id, "master")?;

    let (review_count, rating, work_count) =
        master::get_verification_counts(&state.db_pool, master_id)
            .await
            .map_err(BeepError::Database)?
            .ok_or_else(|| {
                BeepError::NotFound(format!("Master with ID {} not found", master_id))
            })?;

    Ok(Json(VerificationStatus::evaluate(review_count, rating, work_count)))
}
