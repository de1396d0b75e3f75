//! Categories, services and reference cars.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use beep_core::{
    errors::BeepError,
    models::catalog::{Car, Category, Service, ServicesQuery},
};
use beep_db::repositories::catalog;

use crate::{ApiState, handlers::parse_id, middleware::error_handling::AppError};

#[axum::debug_handler]
pub async fn list_categories(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Category>>, AppError> {
    let categories = catalog::get_all_categories(&state.db_pool)
        .await
        .map_err(BeepError::Database)?;

    Ok(Json(categories.into_iter().map(Category::from).collect()))
}

#[axum::debug_handler]
pub async fn get_category(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<Category>, AppError> {
    let id = parse_id(&id, "category")?;

    let category = catalog::get_category_by_id(&state.db_pool, id)
        .await
        .map_err(BeepError::Database)?
        .ok_or_else(|| BeepError::NotFound(format!("Category with ID {} not found", id)))?;

    Ok(Json(category.into()))
}

/// Lists services, optionally filtered by `?category_id=`.
#[axum::debug_handler]
pub async fn list_services(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ServicesQuery>,
) -> Result<Json<Vec<Service>>, AppError> {
    let category_id = query
        .category_id
        .as_deref()
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| parse_id(raw, "category"))
        .transpose()?;

    let services = match category_id {
        Some(category_id) => catalog::get_services_by_category(&state.db_pool, category_id).await,
        None => catalog::get_all_services(&state.db_pool).await,
    }
    .map_err(BeepError::Database)?;

    Ok(Json(services.into_iter().map(Service::from).collect()))
}

#[axum::debug_handler]
pub async fn get_service(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<Service>, AppError> {
    let id = parse_id(&id, "service")?;

    let service = catalog::get_service_by_id(&state.db_pool, id)
        .await
        .map_err(BeepError::Database)?
        .ok_or_else(|| BeepError::NotFound(format!("Service with ID {} not found", id)))?;

    Ok(Json(service.into()))
}

#[axum::debug_handler]
pub async fn list_cars(State(state): State<Arc<ApiState>>) -> Result<Json<Vec<Car>>, AppError> {
    let cars = catalog::get_all_cars(&state.db_pool)
        .await
        .map_err(BeepError::Database)?
        .into_iter()
        .map(Car::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(BeepError::Database)?;

    Ok(Json(cars))
}

#[axum::debug_handler]
pub async fn get_car(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<Car>, AppError> {
    let id = parse_id(&id, "car")?;

    let car = catalog::get_car_by_id(&state.db_pool, id)
        .await
        .map_err(BeepError::Database)?
        .ok_or_else(|| BeepError::NotFound(format!("Car with ID {} not found", id)))?;

    Ok(Json(Car::try_from(car)?))
}
