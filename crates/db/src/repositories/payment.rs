use crate::models::DbPaymentInfo;
use eyre::Result;
use sqlx::{Pool, Postgres};

pub async fn get_payment_info(
    pool: &Pool<Postgres>,
    master_id: i32,
) -> Result<Option<DbPaymentInfo>> {
    let info = sqlx::query_as::<_, DbPaymentInfo>(
        r#"
        SELECT id, master_id, kaspi_card, freedom_card, halyk_card, created_at, updated_at
        FROM master_payment_info
        WHERE master_id = $1
        "#,
    )
    .bind(master_id)
    .fetch_optional(pool)
    .await?;

    Ok(info)
}

/// Creates or replaces the card numbers of a master.
pub async fn upsert_payment_info(
    pool: &Pool<Postgres>,
    master_id: i32,
    kaspi_card: Option<&str>,
    freedom_card: Option<&str>,
    halyk_card: Option<&str>,
) -> Result<DbPaymentInfo> {
    tracing::debug!("Saving payment info for master {}", master_id);

    let info = sqlx::query_as::<_, DbPaymentInfo>(
        r#"
        INSERT INTO master_payment_info (master_id, kaspi_card, freedom_card, halyk_card)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (master_id) DO UPDATE
        SET kaspi_card = EXCLUDED.kaspi_card,
            freedom_card = EXCLUDED.freedom_card,
            halyk_card = EXCLUDED.halyk_card,
            updated_at = NOW()
        RETURNING id, master_id, kaspi_card, freedom_card, halyk_card, created_at, updated_at
        "#,
    )
    .bind(master_id)
    .bind(kaspi_card)
    .bind(freedom_card)
    .bind(halyk_card)
    .fetch_one(pool)
    .await?;

    Ok(info)
}
