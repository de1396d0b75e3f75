//! Round trips against a live Postgres. Run with
//! `TEST_DATABASE_URL=... cargo test -p beep-db -- --ignored`.

use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use fake::{Fake, faker::internet::en::SafeEmail, faker::name::en::Name};
use pretty_assertions::assert_eq;
use beep_core::{
    availability::{available_slots, schedule_day_of_week},
    models::master::ScheduleEntryRequest,
};
use beep_db::{
    DbPool, is_unique_violation,
    mock::create_test_pool,
    repositories::{appointment, catalog, master, review, schedule, user},
};

struct Fixture {
    pool: DbPool,
    customer_id: i32,
    master_id: i32,
    service_id: i32,
}

async fn fixture() -> Fixture {
    let pool = create_test_pool().await.expect("Failed to create test pool");

    let customer = user::create_user(
        &pool,
        &Name().fake::<String>(),
        &SafeEmail().fake::<String>(),
        None,
        "hash",
    )
    .await
    .unwrap();
    let owner = user::create_user(
        &pool,
        &Name().fake::<String>(),
        &SafeEmail().fake::<String>(),
        None,
        "hash",
    )
    .await
    .unwrap();
    let created = master::create_master(
        &pool,
        owner.id,
        &owner.name,
        &owner.email,
        "+70000000000",
        None,
        None,
    )
    .await
    .unwrap();

    let service_id = sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO services (name, base_price, min_price, max_price)
        VALUES ($1, 1000, 500, 1500)
        RETURNING id
        "#,
    )
    .bind(format!("Test service {}", created.id))
    .fetch_one(&pool)
    .await
    .unwrap();

    Fixture {
        pool,
        customer_id: customer.id,
        master_id: created.id,
        service_id,
    }
}

fn next_monday() -> NaiveDate {
    let mut date = Utc::now().date_naive() + Duration::days(1);
    while schedule_day_of_week(date) != 1 {
        date += Duration::days(1);
    }
    date
}

fn hm(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, 0, 0).unwrap()
}

async fn open_slots(fx: &Fixture, date: NaiveDate) -> Vec<String> {
    let window =
        schedule::get_active_schedule_for_day(&fx.pool, fx.master_id, schedule_day_of_week(date))
            .await
            .unwrap()
            .map(|entry| entry.window());
    let booked = appointment::get_booked_times(&fx.pool, fx.master_id, date)
        .await
        .unwrap();
    available_slots(window, &booked)
}

#[tokio::test]
#[ignore]
async fn test_booking_and_cancelling_a_slot() {
    let fx = fixture().await;
    let monday = next_monday();

    schedule::replace_master_schedule(
        &fx.pool,
        fx.master_id,
        &[ScheduleEntryRequest {
            day_of_week: 1,
            start_time: hm(9),
            end_time: hm(18),
            is_active: true,
        }],
    )
    .await
    .unwrap();

    assert_eq!(open_slots(&fx, monday).await.len(), 9);

    let booked = appointment::create_appointment(
        &fx.pool,
        fx.customer_id,
        fx.master_id,
        fx.service_id,
        monday,
        hm(10),
        Some("first visit"),
    )
    .await
    .unwrap()
    .expect("slot should be free");

    let slots = open_slots(&fx, monday).await;
    assert_eq!(slots.len(), 8);
    assert!(!slots.contains(&"10:00".to_string()));

    let fetched = appointment::get_appointment_by_id(&fx.pool, booked.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched.master_id, fx.master_id);
    assert_eq!(fetched.service_id, fx.service_id);
    assert_eq!(fetched.date, monday);
    assert_eq!(fetched.time, hm(10));
    assert_eq!(fetched.comment.as_deref(), Some("first visit"));

    tokio_test::assert_ok!(appointment::cancel_appointment(&fx.pool, booked.id).await);
    assert_eq!(open_slots(&fx, monday).await.len(), 9);
}

#[tokio::test]
#[ignore]
async fn test_double_booking_is_rejected() {
    let fx = fixture().await;
    let monday = next_monday();

    let first = appointment::create_appointment(
        &fx.pool,
        fx.customer_id,
        fx.master_id,
        fx.service_id,
        monday,
        hm(11),
        None,
    )
    .await
    .unwrap();
    let second = appointment::create_appointment(
        &fx.pool,
        fx.customer_id,
        fx.master_id,
        fx.service_id,
        monday,
        hm(11),
        None,
    )
    .await
    .unwrap();

    assert!(first.is_some());
    assert!(second.is_none());
}

#[tokio::test]
#[ignore]
async fn test_duplicate_email_is_unique_violation() {
    let fx = fixture().await;
    let email: String = SafeEmail().fake();

    tokio_test::assert_ok!(user::create_user(&fx.pool, "First", &email, None, "hash").await);
    let err = user::create_user(&fx.pool, "Second", &email, None, "hash")
        .await
        .unwrap_err();

    assert!(is_unique_violation(&err));
}

#[tokio::test]
#[ignore]
async fn test_review_updates_rating() {
    let fx = fixture().await;

    review::create_review(&fx.pool, fx.master_id, fx.customer_id, 5, None).await.unwrap();
    review::create_review(&fx.pool, fx.master_id, fx.customer_id, 4, Some("good")).await.unwrap();

    let updated = master::get_master_by_id(&fx.pool, fx.master_id).await.unwrap().unwrap();
    assert!((updated.rating - 4.5).abs() < 1e-9);

    let reviews = review::get_master_reviews(&fx.pool, fx.master_id).await.unwrap();
    assert_eq!(reviews.len(), 2);
}

#[tokio::test]
#[ignore]
async fn test_service_lookup() {
    let fx = fixture().await;

    let service = catalog::get_service_by_id(&fx.pool, fx.service_id).await.unwrap().unwrap();
    assert_eq!(service.base_price, 1000.0);
    assert!(catalog::get_service_by_id(&fx.pool, -1).await.unwrap().is_none());
}
