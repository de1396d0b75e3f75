//! Fills an empty database with the reference catalog and three demo
//! masters. Safe to run repeatedly.

use beep_api::{config::DEFAULT_DATABASE_URL, middleware::auth::hash_password};
use beep_db::{schema::initialize_database, seed::seed_sample_data};
use color_eyre::eyre::Result;
use dotenv::dotenv;
use tracing::info;

/// Login password shared by the demo master accounts.
const DEMO_PASSWORD: &str = "password123";

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

    let db_pool = beep_db::create_pool(&database_url).await?;
    initialize_database(&db_pool).await?;

    let password_hash = hash_password(DEMO_PASSWORD)?;
    seed_sample_data(&db_pool, &password_hash).await?;

    info!("Sample data ready. Demo masters log in with '{}'.", DEMO_PASSWORD);

    Ok(())
}
