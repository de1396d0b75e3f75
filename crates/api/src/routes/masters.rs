use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/masters", get(handlers::masters::list_masters))
        .route("/masters/:id", get(handlers::masters::get_master))
        .route("/masters/:id/reviews", get(handlers::masters::get_master_reviews))
        .route("/masters/:id/schedule", get(handlers::masters::get_master_schedule))
        .route(
            "/masters/:id/verification",
            get(handlers::masters::get_master_verification),
        )
        .route(
            "/masters/:id/available-slots",
            get(handlers::availability::get_available_slots),
        )
        .route("/reviews", post(handlers::reviews::create_review))
}
