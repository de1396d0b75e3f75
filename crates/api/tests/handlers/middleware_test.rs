use axum::{body::to_bytes, http::StatusCode, response::IntoResponse};
use beep_api::middleware::error_handling::{AppError, conflict_or_database};
use beep_core::errors::BeepError;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::Value;

#[rstest]
#[case(BeepError::NotFound("Master with ID 7 not found".into()), StatusCode::NOT_FOUND)]
#[case(BeepError::Validation("Invalid date format".into()), StatusCode::BAD_REQUEST)]
#[case(BeepError::Authentication("Invalid token".into()), StatusCode::UNAUTHORIZED)]
#[case(BeepError::Authorization("Not yours".into()), StatusCode::FORBIDDEN)]
#[case(BeepError::Conflict("Time slot is already booked".into()), StatusCode::CONFLICT)]
#[case(BeepError::Database(eyre::eyre!("connection reset")), StatusCode::INTERNAL_SERVER_ERROR)]
fn test_error_status_mapping(#[case] error: BeepError, #[case] expected: StatusCode) {
    let response = AppError(error).into_response();
    assert_eq!(response.status(), expected);
}

#[test]
fn test_internal_error_is_server_error() {
    let io = std::io::Error::other("disk full");
    let error = AppError(BeepError::Internal(Box::new(io)));
    assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_error_body_carries_message() {
    let error = BeepError::Conflict("Time slot is already booked".into());
    let response = AppError(error).into_response();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "Conflict: Time slot is already booked");
}

#[test]
fn test_report_converts_to_database_error() {
    let error: AppError = eyre::eyre!("pool timed out").into();
    assert!(matches!(error.0, BeepError::Database(_)));
    assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn test_non_unique_failure_stays_database_error() {
    let error = conflict_or_database(sqlx::Error::RowNotFound.into(), "duplicate");
    assert!(matches!(error, BeepError::Database(_)));
}
