//! # Price Calculator
//!
//! Produces a quote for a service performed on a particular car. The base
//! price is adjusted by at most one age rule and at most one vehicle-class
//! rule; the multipliers compound:
//!
//! | rule                    | condition        | multiplier |
//! |-------------------------|------------------|------------|
//! | old vehicle surcharge   | age > 10 years   | 1.20       |
//! | new vehicle discount    | age < 3 years    | 0.90       |
//! | premium surcharge       | `Premium`        | 1.50       |
//! | luxury surcharge        | `Luxury`         | 2.00       |
//!
//! Each breakdown amount is expressed relative to the *base* price, not to
//! the running total. The service's `min_price`/`max_price` are passed
//! through for display and never used to clamp the result.

use crate::models::catalog::{CalculatePriceResponse, Car, CarType, PriceDetail, Service};

pub const OLD_VEHICLE_AGE: i32 = 10;
pub const NEW_VEHICLE_AGE: i32 = 3;

pub const OLD_VEHICLE_MULTIPLIER: f64 = 1.2;
pub const NEW_VEHICLE_MULTIPLIER: f64 = 0.9;
pub const PREMIUM_MULTIPLIER: f64 = 1.5;
pub const LUXURY_MULTIPLIER: f64 = 2.0;

pub fn vehicle_age(car_year: i32, current_year: i32) -> i32 {
    current_year - car_year
}

fn adjustment(description: &str, base_price: f64, multiplier: f64) -> PriceDetail {
    PriceDetail {
        description: description.to_string(),
        amount: base_price * (multiplier - 1.0),
        multiplier: Some(multiplier),
        is_addition: true,
    }
}

/// Computes the final price and its breakdown.
///
/// `current_year` is supplied by the caller so the calculation stays a pure
/// function of its inputs.
pub fn calculate_price(service: &Service, car: &Car, current_year: i32) -> CalculatePriceResponse {
    let base_price = service.base_price;
    let car_age = vehicle_age(car.year, current_year);
    let mut price = base_price;

    let mut price_details = vec![PriceDetail {
        description: "Base service price".to_string(),
        amount: base_price,
        multiplier: None,
        is_addition: false,
    }];

    if car_age > OLD_VEHICLE_AGE {
        price *= OLD_VEHICLE_MULTIPLIER;
        price_details.push(adjustment(
            "Old vehicle surcharge (+20%)",
            base_price,
            OLD_VEHICLE_MULTIPLIER,
        ));
    } else if car_age < NEW_VEHICLE_AGE {
        price *= NEW_VEHICLE_MULTIPLIER;
        price_details.push(adjustment(
            "New vehicle discount (-10%)",
            base_price,
            NEW_VEHICLE_MULTIPLIER,
        ));
    }

    match car.car_type {
        CarType::Premium => {
            price *= PREMIUM_MULTIPLIER;
            price_details.push(adjustment(
                "Premium vehicle surcharge (+50%)",
                base_price,
                PREMIUM_MULTIPLIER,
            ));
        }
        CarType::Luxury => {
            price *= LUXURY_MULTIPLIER;
            price_details.push(adjustment(
                "Luxury vehicle surcharge (+100%)",
                base_price,
                LUXURY_MULTIPLIER,
            ));
        }
        CarType::Standard => {}
    }

    CalculatePriceResponse {
        service_id: service.id,
        service_name: service.name.clone(),
        car_brand: car.brand.clone(),
        car_model: car.model.clone(),
        car_year: car.year,
        car_type: car.car_type,
        car_age,
        base_price,
        final_price: price,
        min_price: service.min_price,
        max_price: service.max_price,
        price_details,
    }
}
