use crate::models::DbMaster;
use eyre::Result;
use sqlx::{Pool, Postgres};

/// Adding an existing favorite is a no-op.
pub async fn add_favorite(pool: &Pool<Postgres>, user_id: i32, master_id: i32) -> Result<()> {
    tracing::debug!("Adding favorite: user_id={}, master_id={}", user_id, master_id);

    sqlx::query(
        r#"
        INSERT INTO favorite_masters (user_id, master_id)
        VALUES ($1, $2)
        ON CONFLICT (user_id, master_id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(master_id)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn remove_favorite(pool: &Pool<Postgres>, user_id: i32, master_id: i32) -> Result<bool> {
    let result = sqlx::query("DELETE FROM favorite_masters WHERE user_id = $1 AND master_id = $2")
        .bind(user_id)
        .bind(master_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn get_favorite_masters(pool: &Pool<Postgres>, user_id: i32) -> Result<Vec<DbMaster>> {
    let masters = sqlx::query_as::<_, DbMaster>(
        r#"
        SELECT m.id, m.user_id, m.name, m.email, m.phone, m.specialization, m.rating,
               m.photo_url, m.location_lat, m.location_lng, m.address, m.created_at, m.updated_at
        FROM favorite_masters f
        JOIN masters m ON m.id = f.master_id
        WHERE f.user_id = $1
        ORDER BY f.created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(masters)
}
