pub mod appointments;
pub mod auth;
pub mod availability;
pub mod catalog;
pub mod favorites;
pub mod master_profile;
pub mod masters;
pub mod pricing;
pub mod reviews;
pub mod subscription;
pub mod upload;
pub mod user;
pub mod user_cars;
pub mod works;

use beep_core::errors::{BeepError, BeepResult};

/// Parses a path identifier, rejecting anything that is not a positive integer.
pub fn parse_id(raw: &str, what: &str) -> BeepResult<i32> {
    raw.trim()
        .parse::<i32>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| BeepError::Validation(format!("Invalid {} ID", what)))
}

/// Trims a required text field, rejecting empty values.
pub fn required(value: &str, field: &str) -> BeepResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(BeepError::Validation(format!("{} is required", field)));
    }
    Ok(value.to_string())
}
