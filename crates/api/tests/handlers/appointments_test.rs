use axum::{Json, http::StatusCode};
use beep_api::{
    handlers::appointments::{AppointmentParty, appointment_party, check_status_change},
    middleware::error_handling::AppError,
};
use beep_core::{
    availability::{is_schedule_slot, schedule_day_of_week},
    errors::BeepError,
    models::{
        appointment::{Appointment, AppointmentStatus, CreateAppointmentRequest},
        clock::{parse_date, parse_slot},
    },
};
use mockall::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::test_utils::{TestContext, db_appointment, db_schedule, hm, ymd};

const CUSTOMER_ID: i32 = 7;

// Mirrors the booking handler with the repositories swapped for mocks.
async fn create_appointment_wrapper(
    ctx: &TestContext,
    request: CreateAppointmentRequest,
) -> Result<Json<Appointment>, AppError> {
    let date = parse_date(&request.date)?;
    let time = parse_slot(&request.time)?;

    let window = ctx
        .schedule_repo
        .get_active_schedule_for_day(request.master_id, schedule_day_of_week(date))
        .await?
        .map(|entry| entry.window());
    if !is_schedule_slot(window, time) {
        return Err(AppError(BeepError::Validation(
            "outside the master's working hours".into(),
        )));
    }

    let created = ctx
        .appointment_repo
        .create_appointment(
            CUSTOMER_ID,
            request.master_id,
            request.service_id,
            date,
            time,
            request.comment.clone(),
        )
        .await?
        .ok_or_else(|| BeepError::Conflict("Time slot is already booked".into()))?;

    Ok(Json(Appointment::try_from(created)?))
}

fn request(date: &str, time: &str) -> CreateAppointmentRequest {
    CreateAppointmentRequest {
        master_id: 1,
        service_id: 1,
        date: date.to_string(),
        time: time.to_string(),
        comment: Some("Noise from the front axle".to_string()),
    }
}

fn with_monday_hours(ctx: &mut TestContext) {
    ctx.schedule_repo
        .expect_get_active_schedule_for_day()
        .returning(|master_id, day| Ok(Some(db_schedule(master_id, day, hm(9, 0), hm(18, 0)))));
}

#[tokio::test]
async fn test_booking_a_free_slot() {
    let mut ctx = TestContext::new();
    with_monday_hours(&mut ctx);
    ctx.appointment_repo
        .expect_create_appointment()
        .with(
            predicate::eq(CUSTOMER_ID),
            predicate::eq(1),
            predicate::eq(1),
            predicate::eq(ymd(2024, 3, 11)),
            predicate::eq(hm(10, 0)),
            predicate::eq(Some("Noise from the front axle".to_string())),
        )
        .times(1)
        .returning(|user_id, _, _, date, time, comment| {
            let mut row = db_appointment(31, user_id, date, time, "pending");
            row.comment = comment;
            Ok(Some(row))
        });

    let Json(created) = create_appointment_wrapper(&ctx, request("2024-03-11", "10:00"))
        .await
        .unwrap();

    assert_eq!(created.id, 31);
    assert_eq!(created.status, AppointmentStatus::Pending);
    assert_eq!(created.time, hm(10, 0));
    assert_eq!(created.comment.as_deref(), Some("Noise from the front axle"));
}

#[tokio::test]
async fn test_taken_slot_is_conflict() {
    let mut ctx = TestContext::new();
    with_monday_hours(&mut ctx);
    ctx.appointment_repo
        .expect_create_appointment()
        .times(1)
        .returning(|_, _, _, _, _, _| Ok(None));

    let err = create_appointment_wrapper(&ctx, request("2024-03-11", "10:00"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_off_grid_time_is_rejected() {
    let mut ctx = TestContext::new();
    with_monday_hours(&mut ctx);
    ctx.appointment_repo.expect_create_appointment().never();

    for time in ["10:30", "18:00", "08:00"] {
        let err = create_appointment_wrapper(&ctx, request("2024-03-11", time))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST, "time {}", time);
    }
}

#[tokio::test]
async fn test_day_off_cannot_be_booked() {
    let mut ctx = TestContext::new();
    ctx.schedule_repo
        .expect_get_active_schedule_for_day()
        .returning(|_, _| Ok(None));
    ctx.appointment_repo.expect_create_appointment().never();

    let err = create_appointment_wrapper(&ctx, request("2024-03-10", "10:00"))
        .await
        .unwrap_err();

    assert!(matches!(err.0, BeepError::Validation(_)));
}

#[tokio::test]
async fn test_bad_time_format() {
    let ctx = TestContext::new();

    let err = create_appointment_wrapper(&ctx, request("2024-03-11", "ten"))
        .await
        .unwrap_err();

    assert!(matches!(err.0, BeepError::Validation(ref m) if m.contains("Use HH:MM")));
}

#[tokio::test]
async fn test_time_with_seconds_is_rejected() {
    let mut ctx = TestContext::new();
    with_monday_hours(&mut ctx);
    ctx.appointment_repo.expect_create_appointment().never();

    for time in ["10:00:30", "10:00:00"] {
        let err = create_appointment_wrapper(&ctx, request("2024-03-11", time))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST, "time {}", time);
    }
}

#[tokio::test]
async fn test_cancel_returns_cancelled_row() {
    let mut ctx = TestContext::new();
    ctx.appointment_repo
        .expect_cancel_appointment()
        .with(predicate::eq(31))
        .times(1)
        .returning(|id| {
            let date = ymd(2024, 3, 11);
            Ok(Some(db_appointment(id, CUSTOMER_ID, date, hm(10, 0), "cancelled")))
        });

    let row = ctx.appointment_repo.cancel_appointment(31).await.unwrap().unwrap();
    let cancelled = Appointment::try_from(row).unwrap();

    assert_eq!(cancelled.status, AppointmentStatus::Cancelled);
    assert!(!cancelled.status.occupies_slot());
}

#[test]
fn test_party_resolution() {
    assert_eq!(appointment_party(7, 7, Some(3)), Some(AppointmentParty::Customer));
    assert_eq!(appointment_party(3, 7, Some(3)), Some(AppointmentParty::Master));
    assert_eq!(appointment_party(9, 7, Some(3)), None);
    assert_eq!(appointment_party(9, 7, None), None);
}

#[test]
fn test_customer_who_is_also_the_master_is_a_customer() {
    assert_eq!(appointment_party(7, 7, Some(7)), Some(AppointmentParty::Customer));
}

#[rstest]
#[case(AppointmentParty::Master, AppointmentStatus::Pending, AppointmentStatus::Confirmed)]
#[case(AppointmentParty::Master, AppointmentStatus::Confirmed, AppointmentStatus::Completed)]
#[case(AppointmentParty::Master, AppointmentStatus::Pending, AppointmentStatus::Cancelled)]
#[case(AppointmentParty::Customer, AppointmentStatus::Pending, AppointmentStatus::Cancelled)]
#[case(AppointmentParty::Customer, AppointmentStatus::Confirmed, AppointmentStatus::Cancelled)]
#[case(AppointmentParty::Customer, AppointmentStatus::Pending, AppointmentStatus::Pending)]
fn test_allowed_status_changes(
    #[case] party: AppointmentParty,
    #[case] from: AppointmentStatus,
    #[case] to: AppointmentStatus,
) {
    assert!(check_status_change(party, from, to).is_ok());
}

#[rstest]
#[case(AppointmentStatus::Pending, AppointmentStatus::Completed)]
#[case(AppointmentStatus::Pending, AppointmentStatus::Confirmed)]
#[case(AppointmentStatus::Confirmed, AppointmentStatus::Pending)]
fn test_customer_cannot_confirm_or_complete(
    #[case] from: AppointmentStatus,
    #[case] to: AppointmentStatus,
) {
    let err = AppError(check_status_change(AppointmentParty::Customer, from, to).unwrap_err());
    assert_eq!(err.status(), StatusCode::FORBIDDEN);
}

#[rstest]
#[case(AppointmentStatus::Completed, AppointmentStatus::Pending)]
#[case(AppointmentStatus::Completed, AppointmentStatus::Cancelled)]
#[case(AppointmentStatus::Cancelled, AppointmentStatus::Confirmed)]
#[case(AppointmentStatus::Cancelled, AppointmentStatus::Pending)]
fn test_finished_appointments_are_final(
    #[case] from: AppointmentStatus,
    #[case] to: AppointmentStatus,
) {
    for party in [AppointmentParty::Customer, AppointmentParty::Master] {
        let err = AppError(check_status_change(party, from, to).unwrap_err());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
