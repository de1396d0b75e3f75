//! Portfolio entries. Every query is scoped to the owning master.

use crate::models::DbMasterWork;
use chrono::NaiveDate;
use eyre::Result;
use sqlx::{Pool, Postgres};

pub async fn get_master_works(pool: &Pool<Postgres>, master_id: i32) -> Result<Vec<DbMasterWork>> {
    let works = sqlx::query_as::<_, DbMasterWork>(
        r#"
        SELECT id, master_id, title, work_date, customer_name, amount, photo_urls, created_at
        FROM master_works
        WHERE master_id = $1
        ORDER BY work_date DESC, id DESC
        "#,
    )
    .bind(master_id)
    .fetch_all(pool)
    .await?;

    Ok(works)
}

pub async fn get_master_work(
    pool: &Pool<Postgres>,
    id: i32,
    master_id: i32,
) -> Result<Option<DbMasterWork>> {
    let work = sqlx::query_as::<_, DbMasterWork>(
        r#"
        SELECT id, master_id, title, work_date, customer_name, amount, photo_urls, created_at
        FROM master_works
        WHERE id = $1 AND master_id = $2
        "#,
    )
    .bind(id)
    .bind(master_id)
    .fetch_optional(pool)
    .await?;

    Ok(work)
}

pub async fn create_master_work(
    pool: &Pool<Postgres>,
    master_id: i32,
    title: &str,
    work_date: NaiveDate,
    customer_name: &str,
    amount: f64,
    photo_urls: &[String],
) -> Result<DbMasterWork> {
    let work = sqlx::query_as::<_, DbMasterWork>(
        r#"
        INSERT INTO master_works (master_id, title, work_date, customer_name, amount, photo_urls)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, master_id, title, work_date, customer_name, amount, photo_urls, created_at
        "#,
    )
    .bind(master_id)
    .bind(title)
    .bind(work_date)
    .bind(customer_name)
    .bind(amount)
    .bind(photo_urls)
    .fetch_one(pool)
    .await?;

    tracing::debug!("Master work created: id={}, master_id={}", work.id, master_id);
    Ok(work)
}

pub async fn update_master_work(
    pool: &Pool<Postgres>,
    id: i32,
    master_id: i32,
    title: &str,
    work_date: NaiveDate,
    customer_name: &str,
    amount: f64,
    photo_urls: &[String],
) -> Result<Option<DbMasterWork>> {
    let work = sqlx::query_as::<_, DbMasterWork>(
        r#"
        UPDATE master_works
        SET title = $3, work_date = $4, customer_name = $5, amount = $6, photo_urls = $7
        WHERE id = $1 AND master_id = $2
        RETURNING id, master_id, title, work_date, customer_name, amount, photo_urls, created_at
        "#,
    )
    .bind(id)
    .bind(master_id)
    .bind(title)
    .bind(work_date)
    .bind(customer_name)
    .bind(amount)
    .bind(photo_urls)
    .fetch_optional(pool)
    .await?;

    Ok(work)
}

pub async fn delete_master_work(pool: &Pool<Postgres>, id: i32, master_id: i32) -> Result<bool> {
    let result = sqlx::query("DELETE FROM master_works WHERE id = $1 AND master_id = $2")
        .bind(id)
        .bind(master_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
