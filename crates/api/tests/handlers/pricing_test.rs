use axum::Json;
use beep_api::middleware::error_handling::AppError;
use beep_core::{
    errors::BeepError,
    models::catalog::{CalculatePriceRequest, CalculatePriceResponse, Car, CarType},
    pricing,
};
use mockall::predicate;
use pretty_assertions::assert_eq;

use crate::test_utils::{TestContext, db_car, db_service};

const CURRENT_YEAR: i32 = 2025;

// Mirrors the quote handler with the repositories swapped for mocks.
async fn calculate_price_wrapper(
    ctx: &TestContext,
    request: CalculatePriceRequest,
) -> Result<Json<CalculatePriceResponse>, AppError> {
    if request.service_id <= 0 || request.car_id <= 0 {
        return Err(AppError(BeepError::Validation(
            "service_id and car_id are required".into(),
        )));
    }

    let service = ctx
        .catalog_repo
        .get_service_by_id(request.service_id)
        .await?
        .ok_or_else(|| {
            BeepError::NotFound(format!("Service with ID {} not found", request.service_id))
        })?;
    let car = ctx
        .catalog_repo
        .get_car_by_id(request.car_id)
        .await?
        .ok_or_else(|| BeepError::NotFound(format!("Car with ID {} not found", request.car_id)))?;

    let car = Car::try_from(car)?;
    Ok(Json(pricing::calculate_price(&service.into(), &car, CURRENT_YEAR)))
}

#[tokio::test]
async fn test_quote_for_old_standard_car() {
    let mut ctx = TestContext::new();
    ctx.catalog_repo
        .expect_get_service_by_id()
        .with(predicate::eq(1))
        .times(1)
        .returning(|id| Ok(Some(db_service(id, 10_000.0))));
    ctx.catalog_repo
        .expect_get_car_by_id()
        .with(predicate::eq(5))
        .times(1)
        .returning(|id| Ok(Some(db_car(id, 2010, "Standard"))));

    let Json(quote) = calculate_price_wrapper(
        &ctx,
        CalculatePriceRequest {
            service_id: 1,
            car_id: 5,
        },
    )
    .await
    .unwrap();

    assert_eq!(quote.car_age, 15);
    assert_eq!(quote.car_type, CarType::Standard);
    assert!((quote.final_price - 12_000.0).abs() < 1e-9);
    assert_eq!(quote.price_details.len(), 2);
    assert_eq!(quote.min_price, 8_000.0);
    assert_eq!(quote.max_price, 15_000.0);
}

#[tokio::test]
async fn test_quote_for_new_premium_car() {
    let mut ctx = TestContext::new();
    ctx.catalog_repo
        .expect_get_service_by_id()
        .returning(|id| Ok(Some(db_service(id, 20_000.0))));
    ctx.catalog_repo
        .expect_get_car_by_id()
        .returning(|id| Ok(Some(db_car(id, 2023, "Premium"))));

    let Json(quote) = calculate_price_wrapper(
        &ctx,
        CalculatePriceRequest {
            service_id: 2,
            car_id: 2,
        },
    )
    .await
    .unwrap();

    assert!((quote.final_price - 20_000.0 * 0.9 * 1.5).abs() < 1e-9);
    assert_eq!(quote.price_details.len(), 3);
}

#[tokio::test]
async fn test_unknown_service_is_not_found() {
    let mut ctx = TestContext::new();
    ctx.catalog_repo
        .expect_get_service_by_id()
        .returning(|_| Ok(None));
    ctx.catalog_repo.expect_get_car_by_id().never();

    let err = calculate_price_wrapper(
        &ctx,
        CalculatePriceRequest {
            service_id: 99,
            car_id: 1,
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(err.0, BeepError::NotFound(ref m) if m == "Service with ID 99 not found"));
}

#[tokio::test]
async fn test_unknown_car_is_not_found() {
    let mut ctx = TestContext::new();
    ctx.catalog_repo
        .expect_get_service_by_id()
        .returning(|id| Ok(Some(db_service(id, 5_000.0))));
    ctx.catalog_repo.expect_get_car_by_id().returning(|_| Ok(None));

    let err = calculate_price_wrapper(
        &ctx,
        CalculatePriceRequest {
            service_id: 1,
            car_id: 42,
        },
    )
    .await
    .unwrap_err();

    assert_eq!(err.status(), axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_zero_ids_are_rejected_before_lookup() {
    let mut ctx = TestContext::new();
    ctx.catalog_repo.expect_get_service_by_id().never();

    let err = calculate_price_wrapper(
        &ctx,
        CalculatePriceRequest {
            service_id: 0,
            car_id: 0,
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(err.0, BeepError::Validation(_)));
}

#[tokio::test]
async fn test_repository_failure_is_server_error() {
    let mut ctx = TestContext::new();
    ctx.catalog_repo
        .expect_get_service_by_id()
        .returning(|_| Err(eyre::eyre!("connection refused")));

    let err = calculate_price_wrapper(
        &ctx,
        CalculatePriceRequest {
            service_id: 1,
            car_id: 1,
        },
    )
    .await
    .unwrap_err();

    assert_eq!(err.status(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);
}
