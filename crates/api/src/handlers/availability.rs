//! # Availability Handlers
//!
//! Open slots for a master on a date: the master's active schedule row for
//! that weekday, split into hourly slots, minus the times held by
//! non-cancelled appointments.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use beep_core::{
    availability::{available_slots, schedule_day_of_week},
    errors::BeepError,
    models::{
        clock::{DATE_FORMAT, parse_date},
        master::{AvailableSlotsQuery, AvailableSlotsResponse},
    },
};
use beep_db::repositories::{appointment, master, schedule};
use chrono::Utc;

use crate::{ApiState, handlers::parse_id, middleware::error_handling::AppError};

/// `GET /api/v1/masters/:id/available-slots?date=YYYY-MM-DD`
///
/// A missing date means today (UTC). An unknown master yields 404; a master
/// with no schedule that weekday yields an empty list.
#[axum::debug_handler]
pub async fn get_available_slots(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    Query(query): Query<AvailableSlotsQuery>,
) -> Result<Json<AvailableSlotsResponse>, AppError> {
    let master_id = parse_id(&id, "master")?;

    let date = match query.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        Some(raw) => parse_date(raw)?,
        None => Utc::now().date_naive(),
    };

    master::get_master_by_id(&state.db_pool, master_id)
        .await
        .map_err(BeepError::Database)?
        .ok_or_else(|| BeepError::NotFound(format!("Master with ID {} not found", master_id)))?;

    let day_of_week = schedule_day_of_week(date);
    let window = schedule::get_active_schedule_for_day(&state.db_pool, master_id, day_of_week)
        .await
        .map_err(BeepError::Database)?
        .map(|entry| entry.window());

    let booked = match window {
        Some(_) => appointment::get_booked_times(&state.db_pool, master_id, date)
            .await
            .map_err(BeepError::Database)?,
        None => Vec::new(),
    };

    let slots = available_slots(window, &booked);

    tracing::debug!(
        "Available slots: master_id={}, date={}, day_of_week={}, open={}",
        master_id,
        date,
        day_of_week,
        slots.len()
    );

    Ok(Json(AvailableSlotsResponse {
        date: date.format(DATE_FORMAT).to_string(),
        slots,
    }))
}
