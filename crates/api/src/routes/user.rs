use axum::{
    Router,
    routing::{delete, get, post, put},
};
use std::sync::Arc;

use crate::{
    ApiState,
    handlers::{favorites, subscription, user, user_cars},
    routes::photo_body_limit,
};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/user/profile",
            get(user::get_profile).put(user::update_profile),
        )
        .route("/user/photo", post(user::upload_photo).layer(photo_body_limit()))
        .route(
            "/user/subscription",
            get(subscription::get_subscription).put(subscription::update_subscription),
        )
        .route("/user/subscription/trial", post(subscription::activate_trial))
        .route(
            "/user/favorites",
            get(favorites::list_favorites).post(favorites::add_favorite),
        )
        .route("/user/favorites/:master_id", delete(favorites::remove_favorite))
        .route("/user/cars", get(user_cars::list_cars).post(user_cars::create_car))
        .route(
            "/user/cars/:id",
            put(user_cars::update_car).delete(user_cars::delete_car),
        )
        .route("/user/guarantees", get(user::list_guarantees))
        .route("/user/notifications", get(user::list_notifications))
        .route(
            "/user/notifications/:id/read",
            put(user::mark_notification_read),
        )
}
