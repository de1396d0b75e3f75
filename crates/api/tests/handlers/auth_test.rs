use axum::http::{HeaderMap, HeaderValue, header};
use beep_api::middleware::auth::{
    bearer_email, email_from_token, hash_password, issue_token, verify_password,
};
use beep_core::errors::BeepError;
use beep_db::models::DbUser;
use mockall::predicate;
use pretty_assertions::assert_eq;
use test_log::test;

use crate::test_utils::{TestContext, db_user};

fn headers(value: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
    headers
}

#[test]
fn test_password_hash_round_trip() {
    let hash = hash_password("password123").unwrap();

    assert!(hash.starts_with("$argon2"));
    assert!(verify_password("password123", &hash));
    assert!(!verify_password("password124", &hash));
}

#[test]
fn test_hashes_are_salted() {
    let first = hash_password("same").unwrap();
    let second = hash_password("same").unwrap();
    assert_ne!(first, second);
}

#[test]
fn test_garbage_hash_never_verifies() {
    assert!(!verify_password("password123", "not-a-phc-string"));
}

#[test]
fn test_token_carries_email() {
    let token = issue_token("aida@example.com");
    assert_eq!(token, "mock-jwt-token-aida@example.com");
    assert_eq!(email_from_token(&token), Some("aida@example.com"));
}

#[test]
fn test_bare_email_is_accepted_as_token() {
    assert_eq!(email_from_token("aida@example.com"), Some("aida@example.com"));
}

#[test]
fn test_tokens_without_email_are_rejected() {
    assert_eq!(email_from_token("mock-jwt-token-"), None);
    assert_eq!(email_from_token("mock-jwt-token-aida"), None);
    assert_eq!(email_from_token("   "), None);
}

#[test]
fn test_bearer_header_parsing() {
    let email = bearer_email(&headers("Bearer mock-jwt-token-aida@example.com")).unwrap();
    assert_eq!(email, "aida@example.com");
}

#[test]
fn test_bearer_header_errors() {
    let missing = bearer_email(&HeaderMap::new()).unwrap_err();
    assert!(matches!(missing, BeepError::Authentication(ref m) if m == "Authorization header required"));

    let wrong_scheme = bearer_email(&headers("Token aida@example.com")).unwrap_err();
    assert!(matches!(wrong_scheme, BeepError::Authentication(ref m) if m == "Invalid authorization header"));

    let bad_token = bearer_email(&headers("Bearer nobody")).unwrap_err();
    assert!(matches!(bad_token, BeepError::Authentication(ref m) if m == "Invalid token"));
}

// Resolves a bearer header to a user the way the extractor does, against a mock.
async fn authenticate_wrapper(ctx: &TestContext, headers: &HeaderMap) -> Result<DbUser, BeepError> {
    let email = bearer_email(headers)?;
    ctx.user_repo
        .get_user_by_email(email)
        .await
        .map_err(BeepError::Database)?
        .ok_or_else(|| BeepError::Authentication("User not found".to_string()))
}

#[test(tokio::test)]
async fn test_token_resolves_registered_user() {
    let mut ctx = TestContext::new();
    ctx.user_repo
        .expect_get_user_by_email()
        .with(predicate::eq("aida@example.com".to_string()))
        .times(1)
        .returning(|email| Ok(Some(db_user(3, &email))));

    let user = authenticate_wrapper(&ctx, &headers("Bearer mock-jwt-token-aida@example.com"))
        .await
        .unwrap();
    assert_eq!(user.id, 3);
}

#[test(tokio::test)]
async fn test_unknown_email_is_unauthorized() {
    let mut ctx = TestContext::new();
    ctx.user_repo
        .expect_get_user_by_email()
        .times(1)
        .returning(|_| Ok(None));

    let err = authenticate_wrapper(&ctx, &headers("Bearer ghost@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, BeepError::Authentication(_)));
}
