use crate::models::{DbGuarantee, DbGuaranteeWithDetails};
use chrono::NaiveDate;
use eyre::Result;
use sqlx::{Pool, Postgres};

/// Issues the guarantee for an appointment. Returns `None` if one already exists.
pub async fn create_guarantee(
    pool: &Pool<Postgres>,
    user_id: i32,
    appointment_id: i32,
    service_name: &str,
    master_name: Option<&str>,
    service_date: NaiveDate,
    expiry_date: NaiveDate,
) -> Result<Option<DbGuarantee>> {
    tracing::debug!(
        "Issuing guarantee: appointment_id={}, expires={}",
        appointment_id,
        expiry_date
    );

    let guarantee = sqlx::query_as::<_, DbGuarantee>(
        r#"
        INSERT INTO guarantees (user_id, appointment_id, service_name, master_name, service_date, expiry_date)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (appointment_id) DO NOTHING
        RETURNING id, user_id, appointment_id, service_name, master_name, service_date, expiry_date, created_at
        "#,
    )
    .bind(user_id)
    .bind(appointment_id)
    .bind(service_name)
    .bind(master_name)
    .bind(service_date)
    .bind(expiry_date)
    .fetch_optional(pool)
    .await?;

    Ok(guarantee)
}

/// Guarantees still valid on `today`, soonest expiry first.
pub async fn get_active_guarantees(
    pool: &Pool<Postgres>,
    user_id: i32,
    today: NaiveDate,
) -> Result<Vec<DbGuaranteeWithDetails>> {
    let guarantees = sqlx::query_as::<_, DbGuaranteeWithDetails>(
        r#"
        SELECT
            g.id, g.user_id, g.appointment_id, g.service_name, g.master_name,
            g.service_date, g.expiry_date, g.created_at,
            a.date AS appointment_date,
            a.time AS appointment_time,
            a.status AS appointment_status
        FROM guarantees g
        LEFT JOIN appointments a ON a.id = g.appointment_id
        WHERE g.user_id = $1 AND g.expiry_date >= $2
        ORDER BY g.expiry_date ASC
        "#,
    )
    .bind(user_id)
    .bind(today)
    .fetch_all(pool)
    .await?;

    Ok(guarantees)
}
