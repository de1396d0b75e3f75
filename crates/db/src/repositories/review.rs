use crate::models::{DbReview, DbReviewWithUser};
use eyre::Result;
use sqlx::{Pool, Postgres};

pub async fn get_master_reviews(
    pool: &Pool<Postgres>,
    master_id: i32,
) -> Result<Vec<DbReviewWithUser>> {
    let reviews = sqlx::query_as::<_, DbReviewWithUser>(
        r#"
        SELECT r.id, r.master_id, r.user_id, r.rating, r.comment, r.created_at,
               u.name AS user_name
        FROM reviews r
        JOIN users u ON u.id = r.user_id
        WHERE r.master_id = $1
        ORDER BY r.created_at DESC
        "#,
    )
    .bind(master_id)
    .fetch_all(pool)
    .await?;

    Ok(reviews)
}

/// Stores a review and recomputes the master's average rating in one transaction.
pub async fn create_review(
    pool: &Pool<Postgres>,
    master_id: i32,
    user_id: i32,
    rating: i32,
    comment: Option<&str>,
) -> Result<DbReview> {
    tracing::debug!(
        "Creating review: master_id={}, user_id={}, rating={}",
        master_id,
        user_id,
        rating
    );

    let mut tx = pool.begin().await?;

    let review = sqlx::query_as::<_, DbReview>(
        r#"
        INSERT INTO reviews (master_id, user_id, rating, comment)
        VALUES ($1, $2, $3, $4)
        RETURNING id, master_id, user_id, rating, comment, created_at
        "#,
    )
    .bind(master_id)
    .bind(user_id)
    .bind(rating)
    .bind(comment)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        UPDATE masters
        SET rating = (
                SELECT COALESCE(AVG(rating)::DOUBLE PRECISION, 0)
                FROM reviews
                WHERE reviews.master_id = masters.id
            ),
            updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(master_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(review)
}
