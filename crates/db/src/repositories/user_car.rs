use crate::models::DbUserCar;
use eyre::Result;
use sqlx::{Pool, Postgres};

pub async fn get_user_cars(pool: &Pool<Postgres>, user_id: i32) -> Result<Vec<DbUserCar>> {
    let cars = sqlx::query_as::<_, DbUserCar>(
        r#"
        SELECT id, user_id, name, year, comment, created_at, updated_at
        FROM user_cars
        WHERE user_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(cars)
}

pub async fn create_user_car(
    pool: &Pool<Postgres>,
    user_id: i32,
    name: &str,
    year: Option<i32>,
    comment: Option<&str>,
) -> Result<DbUserCar> {
    let car = sqlx::query_as::<_, DbUserCar>(
        r#"
        INSERT INTO user_cars (user_id, name, year, comment)
        VALUES ($1, $2, $3, $4)
        RETURNING id, user_id, name, year, comment, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(name)
    .bind(year)
    .bind(comment)
    .fetch_one(pool)
    .await?;

    tracing::debug!("User car created: id={}, user_id={}", car.id, user_id);
    Ok(car)
}

/// Returns `None` when the car does not exist or belongs to someone else.
pub async fn update_user_car(
    pool: &Pool<Postgres>,
    id: i32,
    user_id: i32,
    name: &str,
    year: Option<i32>,
    comment: Option<&str>,
) -> Result<Option<DbUserCar>> {
    let car = sqlx::query_as::<_, DbUserCar>(
        r#"
        UPDATE user_cars
        SET name = $3, year = $4, comment = $5, updated_at = NOW()
        WHERE id = $1 AND user_id = $2
        RETURNING id, user_id, name, year, comment, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(name)
    .bind(year)
    .bind(comment)
    .fetch_optional(pool)
    .await?;

    Ok(car)
}

pub async fn delete_user_car(pool: &Pool<Postgres>, id: i32, user_id: i32) -> Result<bool> {
    let result = sqlx::query("DELETE FROM user_cars WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
