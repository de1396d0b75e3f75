use crate::models::DbNotification;
use eyre::Result;
use sqlx::{Pool, Postgres};

pub async fn create_notification(
    pool: &Pool<Postgres>,
    user_id: i32,
    kind: &str,
    title: &str,
    message: Option<&str>,
    related_id: Option<i32>,
) -> Result<DbNotification> {
    tracing::debug!("Creating notification: user_id={}, type={}", user_id, kind);

    let notification = sqlx::query_as::<_, DbNotification>(
        r#"
        INSERT INTO notifications (user_id, type, title, message, related_id)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, user_id, type, title, message, related_id, is_read, created_at
        "#,
    )
    .bind(user_id)
    .bind(kind)
    .bind(title)
    .bind(message)
    .bind(related_id)
    .fetch_one(pool)
    .await?;

    Ok(notification)
}

pub async fn get_user_notifications(
    pool: &Pool<Postgres>,
    user_id: i32,
) -> Result<Vec<DbNotification>> {
    let notifications = sqlx::query_as::<_, DbNotification>(
        r#"
        SELECT id, user_id, type, title, message, related_id, is_read, created_at
        FROM notifications
        WHERE user_id = $1
        ORDER BY created_at DESC
        LIMIT 50
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(notifications)
}

pub async fn mark_notification_read(pool: &Pool<Postgres>, id: i32, user_id: i32) -> Result<bool> {
    let result =
        sqlx::query("UPDATE notifications SET is_read = TRUE WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;

    Ok(result.rows_affected() > 0)
}
