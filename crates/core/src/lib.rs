//! # Beep Core
//!
//! Domain types shared by the database and API crates, the error taxonomy,
//! and the two calculators that carry actual business rules:
//!
//! - [`pricing`] turns a service's base price into a final quote for a car
//! - [`availability`] derives bookable hourly slots from a weekly schedule

pub mod availability;
pub mod errors;
pub mod models;
pub mod pricing;
