use crate::models::DbUser;
use eyre::Result;
use sqlx::{Pool, Postgres};

const USER_COLUMNS: &str =
    "id, name, email, phone, photo_url, password_hash, created_at, updated_at";

pub async fn create_user(
    pool: &Pool<Postgres>,
    name: &str,
    email: &str,
    phone: Option<&str>,
    password_hash: &str,
) -> Result<DbUser> {
    tracing::debug!("Creating user: email={}", email);

    let user = sqlx::query_as::<_, DbUser>(&format!(
        r#"
        INSERT INTO users (name, email, phone, password_hash)
        VALUES ($1, $2, $3, $4)
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(name)
    .bind(email)
    .bind(phone)
    .bind(password_hash)
    .fetch_one(pool)
    .await?;

    tracing::debug!("User created successfully: id={}", user.id);
    Ok(user)
}

pub async fn get_user_by_id(pool: &Pool<Postgres>, id: i32) -> Result<Option<DbUser>> {
    let user = sqlx::query_as::<_, DbUser>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn get_user_by_email(pool: &Pool<Postgres>, email: &str) -> Result<Option<DbUser>> {
    tracing::debug!("Getting user by email: {}", email);

    let user = sqlx::query_as::<_, DbUser>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Writes the full profile; callers merge partial updates first.
pub async fn update_user_profile(
    pool: &Pool<Postgres>,
    id: i32,
    name: &str,
    email: &str,
    phone: Option<&str>,
) -> Result<Option<DbUser>> {
    let user = sqlx::query_as::<_, DbUser>(&format!(
        r#"
        UPDATE users
        SET name = $2, email = $3, phone = $4, updated_at = NOW()
        WHERE id = $1
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(name)
    .bind(email)
    .bind(phone)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn update_user_photo(pool: &Pool<Postgres>, id: i32, photo_url: &str) -> Result<bool> {
    let result = sqlx::query("UPDATE users SET photo_url = $2, updated_at = NOW() WHERE id = $1")
        .bind(id)
        .bind(photo_url)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
