//! Read-only reference data: categories, services and cars.

use crate::models::{DbCar, DbCategory, DbService};
use eyre::Result;
use sqlx::{Pool, Postgres};

const SERVICE_COLUMNS: &str =
    "id, category_id, name, description, base_price, min_price, max_price, duration_minutes, created_at";

pub async fn get_all_categories(pool: &Pool<Postgres>) -> Result<Vec<DbCategory>> {
    let categories = sqlx::query_as::<_, DbCategory>(
        r#"
        SELECT id, name, description, created_at
        FROM categories
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await?;

    tracing::debug!("Loaded {} categories", categories.len());
    Ok(categories)
}

pub async fn get_category_by_id(pool: &Pool<Postgres>, id: i32) -> Result<Option<DbCategory>> {
    let category = sqlx::query_as::<_, DbCategory>(
        "SELECT id, name, description, created_at FROM categories WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(category)
}

pub async fn get_all_services(pool: &Pool<Postgres>) -> Result<Vec<DbService>> {
    let services = sqlx::query_as::<_, DbService>(&format!(
        "SELECT {SERVICE_COLUMNS} FROM services ORDER BY id"
    ))
    .fetch_all(pool)
    .await?;

    Ok(services)
}

pub async fn get_services_by_category(
    pool: &Pool<Postgres>,
    category_id: i32,
) -> Result<Vec<DbService>> {
    tracing::debug!("Getting services for category: {}", category_id);

    let services = sqlx::query_as::<_, DbService>(&format!(
        "SELECT {SERVICE_COLUMNS} FROM services WHERE category_id = $1 ORDER BY id"
    ))
    .bind(category_id)
    .fetch_all(pool)
    .await?;

    Ok(services)
}

pub async fn get_service_by_id(pool: &Pool<Postgres>, id: i32) -> Result<Option<DbService>> {
    let service = sqlx::query_as::<_, DbService>(&format!(
        "SELECT {SERVICE_COLUMNS} FROM services WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    if service.is_none() {
        tracing::debug!("Service not found: id={}", id);
    }

    Ok(service)
}

pub async fn get_all_cars(pool: &Pool<Postgres>) -> Result<Vec<DbCar>> {
    let cars =
        sqlx::query_as::<_, DbCar>("SELECT id, brand, model, year, type FROM cars ORDER BY id")
            .fetch_all(pool)
            .await?;

    Ok(cars)
}

pub async fn get_car_by_id(pool: &Pool<Postgres>, id: i32) -> Result<Option<DbCar>> {
    let car =
        sqlx::query_as::<_, DbCar>("SELECT id, brand, model, year, type FROM cars WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;

    Ok(car)
}
