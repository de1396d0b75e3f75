use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers::appointments};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/appointments",
            get(appointments::list_appointments).post(appointments::create_appointment),
        )
        .route(
            "/appointments/:id",
            get(appointments::get_appointment)
                .put(appointments::update_appointment)
                .delete(appointments::cancel_appointment),
        )
}
