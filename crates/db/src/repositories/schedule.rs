use crate::models::DbMasterSchedule;
use beep_core::models::master::ScheduleEntryRequest;
use eyre::Result;
use sqlx::{Pool, Postgres};

pub async fn get_master_schedule(
    pool: &Pool<Postgres>,
    master_id: i32,
) -> Result<Vec<DbMasterSchedule>> {
    tracing::debug!("Getting schedule for master: {}", master_id);

    let schedule = sqlx::query_as::<_, DbMasterSchedule>(
        r#"
        SELECT id, master_id, day_of_week, start_time, end_time, is_active, created_at
        FROM master_schedule
        WHERE master_id = $1
        ORDER BY day_of_week
        "#,
    )
    .bind(master_id)
    .fetch_all(pool)
    .await?;

    Ok(schedule)
}

/// The active working window for one weekday, if the master works that day.
pub async fn get_active_schedule_for_day(
    pool: &Pool<Postgres>,
    master_id: i32,
    day_of_week: i16,
) -> Result<Option<DbMasterSchedule>> {
    let entry = sqlx::query_as::<_, DbMasterSchedule>(
        r#"
        SELECT id, master_id, day_of_week, start_time, end_time, is_active, created_at
        FROM master_schedule
        WHERE master_id = $1 AND day_of_week = $2 AND is_active = TRUE
        "#,
    )
    .bind(master_id)
    .bind(day_of_week)
    .fetch_optional(pool)
    .await?;

    tracing::debug!(
        "Schedule lookup: master_id={}, day_of_week={}, found={}",
        master_id,
        day_of_week,
        entry.is_some()
    );

    Ok(entry)
}

/// Replaces the whole weekly schedule of a master atomically.
pub async fn replace_master_schedule(
    pool: &Pool<Postgres>,
    master_id: i32,
    entries: &[ScheduleEntryRequest],
) -> Result<Vec<DbMasterSchedule>> {
    tracing::debug!(
        "Replacing schedule for master {} with {} entries",
        master_id,
        entries.len()
    );

    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM master_schedule WHERE master_id = $1")
        .bind(master_id)
        .execute(&mut *tx)
        .await?;

    let mut saved = Vec::with_capacity(entries.len());
    for entry in entries {
        let row = sqlx::query_as::<_, DbMasterSchedule>(
            r#"
            INSERT INTO master_schedule (master_id, day_of_week, start_time, end_time, is_active)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, master_id, day_of_week, start_time, end_time, is_active, created_at
            "#,
        )
        .bind(master_id)
        .bind(entry.day_of_week)
        .bind(entry.start_time)
        .bind(entry.end_time)
        .bind(entry.is_active)
        .fetch_one(&mut *tx)
        .await?;
        saved.push(row);
    }

    tx.commit().await?;

    saved.sort_by_key(|row| row.day_of_week);
    Ok(saved)
}
