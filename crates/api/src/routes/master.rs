use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{
    ApiState,
    handlers::{master_profile, reviews, works},
    routes::photo_body_limit,
};

/// Routes acting on the caller's own master profile.
pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/master/profile",
            get(master_profile::get_profile)
                .post(master_profile::create_profile)
                .put(master_profile::update_profile)
                .delete(master_profile::delete_profile),
        )
        .route(
            "/master/photo",
            post(master_profile::upload_photo).layer(photo_body_limit()),
        )
        .route(
            "/master/schedule",
            get(master_profile::get_schedule).put(master_profile::update_schedule),
        )
        .route(
            "/master/payment-info",
            get(master_profile::get_payment_info).put(master_profile::update_payment_info),
        )
        .route(
            "/master/reviews",
            get(master_profile::get_own_reviews).post(reviews::create_review),
        )
        .route("/master/notifications", get(master_profile::get_notifications))
        .route("/master/works", get(works::list_works).post(works::create_work))
        .route(
            "/master/works/photo",
            post(works::upload_work_photo).layer(photo_body_limit()),
        )
        .route(
            "/master/works/:id",
            get(works::get_work)
                .put(works::update_work)
                .delete(works::delete_work),
        )
}
