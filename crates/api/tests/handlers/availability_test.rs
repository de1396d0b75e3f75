use axum::Json;
use beep_api::middleware::error_handling::AppError;
use beep_core::{
    availability::{available_slots, schedule_day_of_week},
    models::{
        clock::{DATE_FORMAT, parse_date},
        master::AvailableSlotsResponse,
    },
};
use mockall::predicate;
use pretty_assertions::assert_eq;

use crate::test_utils::{TestContext, db_schedule, hm};

// Mirrors the available-slots handler with the repositories swapped for mocks.
async fn available_slots_wrapper(
    ctx: &TestContext,
    master_id: i32,
    date: &str,
) -> Result<Json<AvailableSlotsResponse>, AppError> {
    let date = parse_date(date)?;

    let window = ctx
        .schedule_repo
        .get_active_schedule_for_day(master_id, schedule_day_of_week(date))
        .await?
        .map(|entry| entry.window());

    let booked = match window {
        Some(_) => ctx.schedule_repo.get_booked_times(master_id, date).await?,
        None => Vec::new(),
    };

    Ok(Json(AvailableSlotsResponse {
        date: date.format(DATE_FORMAT).to_string(),
        slots: available_slots(window, &booked),
    }))
}

#[tokio::test]
async fn test_monday_with_no_bookings() {
    let mut ctx = TestContext::new();
    // 2024-03-11 is a Monday.
    ctx.schedule_repo
        .expect_get_active_schedule_for_day()
        .with(predicate::eq(4), predicate::eq(1))
        .times(1)
        .returning(|master_id, day| Ok(Some(db_schedule(master_id, day, hm(9, 0), hm(18, 0)))));
    ctx.schedule_repo
        .expect_get_booked_times()
        .times(1)
        .returning(|_, _| Ok(vec![]));

    let Json(response) = available_slots_wrapper(&ctx, 4, "2024-03-11").await.unwrap();

    assert_eq!(response.date, "2024-03-11");
    assert_eq!(
        response.slots,
        vec!["09:00", "10:00", "11:00", "12:00", "13:00", "14:00", "15:00", "16:00", "17:00"]
    );
}

#[tokio::test]
async fn test_booked_slot_is_removed() {
    let mut ctx = TestContext::new();
    ctx.schedule_repo
        .expect_get_active_schedule_for_day()
        .returning(|master_id, day| Ok(Some(db_schedule(master_id, day, hm(9, 0), hm(12, 0)))));
    ctx.schedule_repo
        .expect_get_booked_times()
        .returning(|_, _| Ok(vec![hm(10, 0)]));

    let Json(response) = available_slots_wrapper(&ctx, 1, "2024-03-11").await.unwrap();

    assert_eq!(response.slots, vec!["09:00", "11:00"]);
}

#[tokio::test]
async fn test_day_off_skips_booking_lookup() {
    let mut ctx = TestContext::new();
    // 2024-03-10 is a Sunday.
    ctx.schedule_repo
        .expect_get_active_schedule_for_day()
        .with(predicate::always(), predicate::eq(0))
        .returning(|_, _| Ok(None));
    ctx.schedule_repo.expect_get_booked_times().never();

    let Json(response) = available_slots_wrapper(&ctx, 1, "2024-03-10").await.unwrap();

    assert!(response.slots.is_empty());
}

#[tokio::test]
async fn test_malformed_date_is_bad_request() {
    let ctx = TestContext::new();

    let err = available_slots_wrapper(&ctx, 1, "11.03.2024").await.unwrap_err();

    assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
}
