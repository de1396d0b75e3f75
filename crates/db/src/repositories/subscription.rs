use crate::models::DbSubscription;
use chrono::{DateTime, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};

pub async fn get_user_subscription(
    pool: &Pool<Postgres>,
    user_id: i32,
) -> Result<Option<DbSubscription>> {
    let subscription = sqlx::query_as::<_, DbSubscription>(
        r#"
        SELECT id, user_id, plan, trial_start_date, trial_end_date, created_at, updated_at
        FROM user_subscriptions
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(subscription)
}

/// Sets the plan, creating the row if needed. Trial dates are left untouched.
pub async fn upsert_subscription_plan(
    pool: &Pool<Postgres>,
    user_id: i32,
    plan: &str,
) -> Result<DbSubscription> {
    tracing::debug!("Setting subscription plan: user_id={}, plan={}", user_id, plan);

    let subscription = sqlx::query_as::<_, DbSubscription>(
        r#"
        INSERT INTO user_subscriptions (user_id, plan)
        VALUES ($1, $2)
        ON CONFLICT (user_id) DO UPDATE
        SET plan = EXCLUDED.plan, updated_at = NOW()
        RETURNING id, user_id, plan, trial_start_date, trial_end_date, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(plan)
    .fetch_one(pool)
    .await?;

    Ok(subscription)
}

/// Switches the user to the trial plan with the given window.
pub async fn start_trial(
    pool: &Pool<Postgres>,
    user_id: i32,
    trial_start: DateTime<Utc>,
    trial_end: DateTime<Utc>,
) -> Result<DbSubscription> {
    tracing::debug!("Starting trial for user {} until {}", user_id, trial_end);

    let subscription = sqlx::query_as::<_, DbSubscription>(
        r#"
        INSERT INTO user_subscriptions (user_id, plan, trial_start_date, trial_end_date)
        VALUES ($1, 'trial', $2, $3)
        ON CONFLICT (user_id) DO UPDATE
        SET plan = 'trial',
            trial_start_date = EXCLUDED.trial_start_date,
            trial_end_date = EXCLUDED.trial_end_date,
            updated_at = NOW()
        RETURNING id, user_id, plan, trial_start_date, trial_end_date, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(trial_start)
    .bind(trial_end)
    .fetch_one(pool)
    .await?;

    Ok(subscription)
}
