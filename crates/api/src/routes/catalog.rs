use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/categories", get(handlers::catalog::list_categories))
        .route("/categories/:id", get(handlers::catalog::get_category))
        .route("/services", get(handlers::catalog::list_services))
        .route("/services/:id", get(handlers::catalog::get_service))
        .route("/cars", get(handlers::catalog::list_cars))
        .route("/cars/:id", get(handlers::catalog::get_car))
        .route("/pricing/calculate", post(handlers::pricing::calculate_price))
}
