use crate::models::{DbMaster, DbMasterSummary};
use eyre::Result;
use sqlx::{Pool, Postgres};

const MASTER_COLUMNS: &str = "id, user_id, name, email, phone, specialization, rating, \
     photo_url, location_lat, location_lng, address, created_at, updated_at";

/// All masters, best rated first, with verification counters.
///
/// `viewer_id` is the calling user, if any; it only drives `is_favorite`.
pub async fn get_all_masters(
    pool: &Pool<Postgres>,
    viewer_id: Option<i32>,
) -> Result<Vec<DbMasterSummary>> {
    let masters = sqlx::query_as::<_, DbMasterSummary>(
        r#"
        SELECT
            m.id, m.user_id, m.name, m.email, m.phone, m.specialization, m.rating,
            m.photo_url, m.location_lat, m.location_lng, m.address, m.created_at, m.updated_at,
            (SELECT COUNT(*) FROM reviews r WHERE r.master_id = m.id) AS review_count,
            (SELECT COUNT(*) FROM master_works w WHERE w.master_id = m.id) AS work_count,
            EXISTS (
                SELECT 1 FROM favorite_masters f
                WHERE f.master_id = m.id AND f.user_id = $1
            ) AS is_favorite
        FROM masters m
        ORDER BY m.rating DESC, m.id ASC
        "#,
    )
    .bind(viewer_id)
    .fetch_all(pool)
    .await?;

    tracing::debug!("Loaded {} masters", masters.len());
    Ok(masters)
}

pub async fn get_master_by_id(pool: &Pool<Postgres>, id: i32) -> Result<Option<DbMaster>> {
    let master = sqlx::query_as::<_, DbMaster>(&format!(
        "SELECT {MASTER_COLUMNS} FROM masters WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(master)
}

pub async fn get_master_by_user_id(
    pool: &Pool<Postgres>,
    user_id: i32,
) -> Result<Option<DbMaster>> {
    let master = sqlx::query_as::<_, DbMaster>(&format!(
        "SELECT {MASTER_COLUMNS} FROM masters WHERE user_id = $1"
    ))
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(master)
}

pub async fn create_master(
    pool: &Pool<Postgres>,
    user_id: i32,
    name: &str,
    email: &str,
    phone: &str,
    specialization: Option<&str>,
    address: Option<&str>,
) -> Result<DbMaster> {
    tracing::debug!("Creating master profile: user_id={}, email={}", user_id, email);

    let master = sqlx::query_as::<_, DbMaster>(&format!(
        r#"
        INSERT INTO masters (user_id, name, email, phone, specialization, address)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {MASTER_COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(name)
    .bind(email)
    .bind(phone)
    .bind(specialization)
    .bind(address)
    .fetch_one(pool)
    .await?;

    tracing::debug!("Master created successfully: id={}", master.id);
    Ok(master)
}

pub async fn update_master(
    pool: &Pool<Postgres>,
    id: i32,
    name: &str,
    email: &str,
    phone: &str,
    specialization: Option<&str>,
    address: Option<&str>,
) -> Result<Option<DbMaster>> {
    let master = sqlx::query_as::<_, DbMaster>(&format!(
        r#"
        UPDATE masters
        SET name = $2, email = $3, phone = $4, specialization = $5, address = $6, updated_at = NOW()
        WHERE id = $1
        RETURNING {MASTER_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(name)
    .bind(email)
    .bind(phone)
    .bind(specialization)
    .bind(address)
    .fetch_optional(pool)
    .await?;

    Ok(master)
}

pub async fn update_master_photo(pool: &Pool<Postgres>, id: i32, photo_url: &str) -> Result<bool> {
    let result = sqlx::query("UPDATE masters SET photo_url = $2, updated_at = NOW() WHERE id = $1")
        .bind(id)
        .bind(photo_url)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_master_by_user_id(pool: &Pool<Postgres>, user_id: i32) -> Result<bool> {
    tracing::debug!("Deleting master profile for user {}", user_id);

    let result = sqlx::query("DELETE FROM masters WHERE user_id = $1")
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// `(review_count, rating, work_count)` for the verification rule.
pub async fn get_verification_counts(
    pool: &Pool<Postgres>,
    master_id: i32,
) -> Result<Option<(i64, f64, i64)>> {
    let counts = sqlx::query_as::<_, (i64, f64, i64)>(
        r#"
        SELECT
            (SELECT COUNT(*) FROM reviews WHERE master_id = m.id),
            m.rating,
            (SELECT COUNT(*) FROM master_works WHERE master_id = m.id)
        FROM masters m
        WHERE m.id = $1
        "#,
    )
    .bind(master_id)
    .fetch_optional(pool)
    .await?;

    Ok(counts)
}
