//! Wall-clock helpers.
//!
//! Appointment times and schedule windows travel over the wire as `"HH:MM"`
//! and dates as `"YYYY-MM-DD"`. Use this module with `#[serde(with = ...)]`
//! on `NaiveTime` fields.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer, Serializer, de};

use crate::errors::{BeepError, BeepResult};

pub const CLOCK_FORMAT: &str = "%H:%M";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Formats a time as `"HH:MM"`, dropping seconds.
pub fn format_clock(time: NaiveTime) -> String {
    time.format(CLOCK_FORMAT).to_string()
}

/// Parses `"HH:MM"`, also accepting the `"HH:MM:SS"` form Postgres prints.
pub fn parse_clock(value: &str) -> BeepResult<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, CLOCK_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| BeepError::Validation(format!("Invalid time '{}'. Use HH:MM", value)))
}

/// Parses a bookable slot time. Only `"HH:MM"` is accepted, so the stored
/// value always sits on the minute and matches the slot grid exactly.
pub fn parse_slot(value: &str) -> BeepResult<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, CLOCK_FORMAT)
        .map_err(|_| BeepError::Validation(format!("Invalid time '{}'. Use HH:MM", value)))
}

pub fn parse_date(value: &str) -> BeepResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| BeepError::Validation("Invalid date format. Use YYYY-MM-DD".to_string()))
}

pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_clock(*time))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_clock(&raw).map_err(de::Error::custom)
}
