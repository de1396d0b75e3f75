use std::sync::Arc;

use axum::{Json, extract::State};
use beep_core::{
    errors::BeepError,
    models::account::{Subscription, SubscriptionPlan, UpdateSubscriptionRequest, trial_window},
};
use beep_db::{models::DbSubscription, repositories::subscription};
use chrono::Utc;

use crate::{
    ApiState,
    middleware::{auth::AuthUser, error_handling::AppError},
};

async fn start_trial(state: &ApiState, user_id: i32) -> Result<DbSubscription, BeepError> {
    let (start, end) = trial_window(Utc::now());
    tracing::info!("Starting trial: user_id={}, ends={}", user_id, end);

    subscription::start_trial(&state.db_pool, user_id, start, end)
        .await
        .map_err(BeepError::Database)
}

/// Users without a subscription row get a `basic` one on first read.
#[axum::debug_handler]
pub async fn get_subscription(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
) -> Result<Json<Subscription>, AppError> {
    let current = match subscription::get_user_subscription(&state.db_pool, user.id)
        .await
        .map_err(BeepError::Database)?
    {
        Some(current) => current,
        None => subscription::upsert_subscription_plan(
            &state.db_pool,
            user.id,
            SubscriptionPlan::Basic.as_str(),
        )
        .await
        .map_err(BeepError::Database)?,
    };

    Ok(Json(Subscription::try_from(current)?))
}

#[axum::debug_handler]
pub async fn update_subscription(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Json(payload): Json<UpdateSubscriptionRequest>,
) -> Result<Json<Subscription>, AppError> {
    let plan: SubscriptionPlan = payload.plan.trim().to_lowercase().parse()?;

    let updated = match plan {
        SubscriptionPlan::Trial => start_trial(&state, user.id).await?,
        other => subscription::upsert_subscription_plan(&state.db_pool, user.id, other.as_str())
            .await
            .map_err(BeepError::Database)?,
    };

    Ok(Json(Subscription::try_from(updated)?))
}

#[axum::debug_handler]
pub async fn activate_trial(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
) -> Result<Json<Subscription>, AppError> {
    let started = start_trial(&state, user.id).await?;
    Ok(Json(Subscription::try_from(started)?))
}
