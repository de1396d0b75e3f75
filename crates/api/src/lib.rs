//! # Beep API
//!
//! HTTP server for the Beep car-service marketplace: catalog browsing, price
//! quotes, master profiles, slot lookup and appointment booking.
//!
//! - **Routes**: URL structure under `/api/v1`; health checks also answer at the root
//! - **Handlers**: request parsing and calls into `beep_db` repositories
//! - **Middleware**: the bearer-token extractor and error-to-HTTP mapping
//! - **Config**: environment-driven settings

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Authentication extractor and error handling
pub mod middleware;
/// Route definitions
pub mod routes;

use std::{path::PathBuf, sync::Arc, time::Duration};

use axum::{
    Router,
    http::{HeaderValue, Method, header},
};
use eyre::{Result, WrapErr};
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Shared application state handed to every handler.
pub struct ApiState {
    /// PostgreSQL connection pool for database operations
    pub db_pool: PgPool,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
}

impl ApiState {
    pub fn new(db_pool: PgPool, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            db_pool,
            static_dir: static_dir.into(),
        }
    }

    /// Where uploaded photos are written.
    pub fn upload_dir(&self) -> PathBuf {
        self.static_dir.join(handlers::upload::UPLOAD_SUBDIR)
    }
}

/// Builds the application router with every route and the static file service.
///
/// CORS and the request timeout are added by [`start_server`].
pub fn build_router(state: Arc<ApiState>) -> Router {
    let static_files = ServeDir::new(&state.static_dir);

    Router::new()
        .merge(routes::health::routes())
        .nest(
            routes::API_PREFIX,
            Router::new()
                .merge(routes::health::routes())
                .merge(routes::auth::routes())
                .merge(routes::user::routes())
                .merge(routes::catalog::routes())
                .merge(routes::masters::routes())
                .merge(routes::master::routes())
                .merge(routes::appointments::routes()),
        )
        .nest_service("/static", static_files)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: Option<&[String]>) -> Result<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT]);

    let Some(origins) = origins else {
        return Ok(layer.allow_origin(Any));
    };

    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .wrap_err_with(|| format!("Invalid CORS origin: {}", origin))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(layer.allow_origin(origins).allow_credentials(true))
}

/// Starts the API server with the provided configuration and database pool.
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    tokio::fs::create_dir_all(config.static_dir.join(handlers::upload::UPLOAD_SUBDIR))
        .await
        .wrap_err("Failed to create upload directory")?;

    let state = Arc::new(ApiState::new(db_pool, config.static_dir.clone()));

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(cors_layer(config.cors_origins.as_deref())?)
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
