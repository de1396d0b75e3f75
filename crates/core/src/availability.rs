//! # Available-Slot Calculator
//!
//! A master's week is described by at most one active schedule row per
//! weekday. Bookable slots for a date are generated hourly from the row's
//! start time (inclusive) to its end time (exclusive), then every slot
//! already taken by a non-cancelled appointment is removed.
//!
//! Weekdays are numbered 0 = Sunday through 6 = Saturday.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};

use crate::models::clock::format_clock;

pub const SLOT_MINUTES: u32 = 60;

/// Schedule row index for a calendar date.
pub fn schedule_day_of_week(date: NaiveDate) -> i16 {
    date.weekday().num_days_from_sunday() as i16
}

pub fn is_valid_day_of_week(day: i16) -> bool {
    (0..=6).contains(&day)
}

fn minutes_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Every slot start in `[start, end)` at [`SLOT_MINUTES`] steps.
pub fn candidate_slots(start: NaiveTime, end: NaiveTime) -> Vec<NaiveTime> {
    let end_minutes = minutes_of_day(end);
    (minutes_of_day(start)..end_minutes)
        .step_by(SLOT_MINUTES as usize)
        .filter_map(|minutes| NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0))
        .collect()
}

/// Candidate slots for `window` minus `booked`, as ascending `"HH:MM"` strings.
///
/// `window` is `None` when the master has no active schedule for the day,
/// in which case nothing is bookable.
pub fn available_slots(
    window: Option<(NaiveTime, NaiveTime)>,
    booked: &[NaiveTime],
) -> Vec<String> {
    let Some((start, end)) = window else {
        return Vec::new();
    };

    let taken: HashSet<String> = booked.iter().map(|time| format_clock(*time)).collect();

    candidate_slots(start, end)
        .into_iter()
        .map(format_clock)
        .filter(|slot| !taken.contains(slot))
        .collect()
}

/// Whether `time` is exactly one of the slot starts generated for `window`.
///
/// Seconds count: 10:00:30 is not the 10:00 slot.
pub fn is_schedule_slot(window: Option<(NaiveTime, NaiveTime)>, time: NaiveTime) -> bool {
    match window {
        Some((start, end)) => candidate_slots(start, end).contains(&time),
        None => false,
    }
}
