//! # Price quotes
//!
//! Looks up the service and car, then hands them to the pure calculator in
//! `beep_core::pricing`. Nothing is written.

use std::sync::Arc;

use axum::{Json, extract::State};
use beep_core::{
    errors::BeepError,
    models::catalog::{CalculatePriceRequest, CalculatePriceResponse, Car, Service},
    pricing,
};
use chrono::{Datelike, Utc};

use crate::{ApiState, middleware::error_handling::AppError};

#[axum::debug_handler]
pub async fn calculate_price(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CalculatePriceRequest>,
) -> Result<Json<CalculatePriceResponse>, AppError> {
    if payload.service_id <= 0 || payload.car_id <= 0 {
        return Err(BeepError::Validation("service_id and car_id are required".to_string()).into());
    }

    let service: Service =
        beep_db::repositories::catalog::get_service_by_id(&state.db_pool, payload.service_id)
            .await
            .map_err(BeepError::Database)?
            .ok_or_else(|| {
                BeepError::NotFound(format!("Service with ID {} not found", payload.service_id))
            })?
            .into();

    let car = beep_db::repositories::catalog::get_car_by_id(&state.db_pool, payload.car_id)
        .await
        .map_err(BeepError::Database)?
        .ok_or_else(|| BeepError::NotFound(format!("Car with ID {} not found", payload.car_id)))?;
    let car = Car::try_from(car)?;

    let quote = pricing::calculate_price(&service, &car, Utc::now().year());

    tracing::debug!(
        "Price quote: service_id={}, car_id={}, final_price={}",
        service.id,
        car.id,
        quote.final_price
    );

    Ok(Json(quote))
}
