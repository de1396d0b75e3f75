use beep_api::config::ApiConfig;
use beep_db::{create_pool, schema::initialize_database};
use color_eyre::eyre::Result;
use dotenv::dotenv;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    let config = ApiConfig::from_env()?;

    let db_pool = create_pool(&config.database_url).await?;

    // Tables are created idempotently on every start
    initialize_database(&db_pool).await?;

    beep_api::start_server(config, db_pool).await?;

    Ok(())
}
