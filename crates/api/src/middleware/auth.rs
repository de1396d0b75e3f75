//! # Authentication Module
//!
//! Password hashing with Argon2 and the bearer-token extractors.
//!
//! Tokens are opaque strings of the form `mock-jwt-token-<email>`; a bare
//! email is accepted as well. The email must belong to a registered user.

use std::sync::Arc;

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use beep_core::errors::BeepError;
use eyre::Result;

use crate::{ApiState, middleware::error_handling::AppError};

pub const TOKEN_PREFIX: &str = "mock-jwt-token-";

/// Hashes a password with a fresh random salt, in PHC string format.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| eyre::eyre!("Error hashing password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// Checks `password` against a stored PHC hash.
///
/// A hash that cannot be parsed never matches.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    match PasswordHash::new(password_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::warn!("Stored password hash is not a valid PHC string: {}", e);
            false
        }
    }
}

pub fn issue_token(email: &str) -> String {
    format!("{}{}", TOKEN_PREFIX, email)
}

/// The email a token refers to, if it looks like one.
pub fn email_from_token(token: &str) -> Option<&str> {
    let token = token.trim();
    let email = token.strip_prefix(TOKEN_PREFIX).unwrap_or(token);
    (!email.is_empty() && email.contains('@')).then_some(email)
}

/// Pulls the caller's email out of an `Authorization: Bearer ...` header.
pub fn bearer_email(headers: &HeaderMap) -> Result<String, BeepError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| BeepError::Authentication("Authorization header required".to_string()))?
        .to_str()
        .map_err(|_| BeepError::Authentication("Invalid authorization header".to_string()))?;

    let token = value
        .strip_prefix("Bearer ")
        .ok_or_else(|| BeepError::Authentication("Invalid authorization header".to_string()))?;

    email_from_token(token)
        .map(str::to_string)
        .ok_or_else(|| BeepError::Authentication("Invalid token".to_string()))
}

/// The registered user making the request.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i32,
    pub email: String,
    pub name: String,
}

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        let email = bearer_email(&parts.headers)?;

        let user = beep_db::repositories::user::get_user_by_email(&state.db_pool, &email)
            .await
            .map_err(BeepError::Database)?
            .ok_or_else(|| BeepError::Authentication("User not found".to_string()))?;

        Ok(AuthUser {
            id: user.id,
            email: user.email,
            name: user.name,
        })
    }
}

/// Like [`AuthUser`] but never rejects; anonymous or invalid callers yield `None`.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for OptionalAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        if !parts.headers.contains_key(header::AUTHORIZATION) {
            return Ok(OptionalAuthUser(None));
        }

        match AuthUser::from_request_parts(parts, state).await {
            Ok(user) => Ok(OptionalAuthUser(Some(user))),
            Err(AppError(BeepError::Authentication(_))) => Ok(OptionalAuthUser(None)),
            Err(err) => Err(err),
        }
    }
}
