use beep_api::handlers::{
    master_profile::{normalize_card, validate_schedule},
    parse_id, required,
    reviews::validate_review,
};
use beep_core::{
    errors::BeepError,
    models::master::{CreateReviewRequest, ScheduleEntryRequest},
};
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::test_utils::hm;

fn entry(day_of_week: i16, start: (u32, u32), end: (u32, u32)) -> ScheduleEntryRequest {
    ScheduleEntryRequest {
        day_of_week,
        start_time: hm(start.0, start.1),
        end_time: hm(end.0, end.1),
        is_active: true,
    }
}

#[rstest]
#[case("1", Some(1))]
#[case(" 42 ", Some(42))]
#[case("0", None)]
#[case("-1", None)]
#[case("abc", None)]
#[case("", None)]
#[case("99999999999", None)]
fn test_parse_id(#[case] raw: &str, #[case] expected: Option<i32>) {
    assert_eq!(parse_id(raw, "master").ok(), expected);
}

#[test]
fn test_parse_id_message_names_the_resource() {
    let err = parse_id("x", "appointment").unwrap_err();
    assert!(matches!(err, BeepError::Validation(ref m) if m == "Invalid appointment ID"));
}

#[test]
fn test_required_trims_and_rejects_blank() {
    assert_eq!(required("  Aida ", "Name").unwrap(), "Aida");
    let err = required("   ", "Name").unwrap_err();
    assert!(matches!(err, BeepError::Validation(ref m) if m == "Name is required"));
}

#[test]
fn test_weekly_schedule_is_accepted() {
    let week: Vec<_> = (1..=5).map(|day| entry(day, (9, 0), (18, 0))).collect();
    assert!(validate_schedule(&week).is_ok());
    assert!(validate_schedule(&[]).is_ok());
}

#[rstest]
#[case(vec![entry(7, (9, 0), (18, 0))], "Invalid day_of_week 7")]
#[case(vec![entry(-1, (9, 0), (18, 0))], "Invalid day_of_week -1")]
#[case(vec![entry(1, (18, 0), (9, 0))], "start_time must be before end_time")]
#[case(vec![entry(1, (9, 0), (9, 0))], "start_time must be before end_time")]
#[case(vec![entry(2, (9, 0), (12, 0)), entry(2, (13, 0), (18, 0))], "Duplicate schedule entry for day 2")]
fn test_invalid_schedules(#[case] entries: Vec<ScheduleEntryRequest>, #[case] expected: &str) {
    match validate_schedule(&entries) {
        Err(BeepError::Validation(message)) => {
            assert!(message.starts_with(expected), "{}", message)
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn test_card_numbers_are_normalized() {
    assert_eq!(
        normalize_card(Some("4400 4301-2345 6789")).unwrap().as_deref(),
        Some("4400430123456789")
    );
    assert_eq!(normalize_card(Some("  ")).unwrap(), None);
    assert_eq!(normalize_card(None).unwrap(), None);
}

#[test]
fn test_bad_card_numbers_are_rejected() {
    assert!(normalize_card(Some("4400 4301")).is_err());
    assert!(normalize_card(Some("4400-4301-2345-67ab")).is_err());
}

#[rstest]
#[case(1, true)]
#[case(5, true)]
#[case(0, false)]
#[case(6, false)]
fn test_review_rating_bounds(#[case] rating: i32, #[case] valid: bool) {
    let request = CreateReviewRequest {
        master_id: 1,
        rating,
        comment: None,
    };
    assert_eq!(validate_review(&request).is_ok(), valid);
}

#[test]
fn test_review_needs_master() {
    let request = CreateReviewRequest {
        master_id: 0,
        rating: 5,
        comment: Some("Great".to_string()),
    };
    assert!(validate_review(&request).is_err());
}
