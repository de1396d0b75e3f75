use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::BeepError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: i32,
    pub category_id: Option<i32>,
    pub name: String,
    pub description: Option<String>,
    pub base_price: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub duration_minutes: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Vehicle class used by the pricing rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CarType {
    Standard,
    Premium,
    Luxury,
}

impl CarType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CarType::Standard => "Standard",
            CarType::Premium => "Premium",
            CarType::Luxury => "Luxury",
        }
    }
}

impl fmt::Display for CarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CarType {
    type Err = BeepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Standard" => Ok(CarType::Standard),
            "Premium" => Ok(CarType::Premium),
            "Luxury" => Ok(CarType::Luxury),
            other => Err(BeepError::Validation(format!("Unknown car type: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Car {
    pub id: i32,
    pub brand: String,
    pub model: String,
    pub year: i32,
    #[serde(rename = "type")]
    pub car_type: CarType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicesQuery {
    pub category_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculatePriceRequest {
    pub service_id: i32,
    pub car_id: i32,
}

/// One line of a price explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceDetail {
    pub description: String,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplier: Option<f64>,
    pub is_addition: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculatePriceResponse {
    pub service_id: i32,
    pub service_name: String,
    pub car_brand: String,
    pub car_model: String,
    pub car_year: i32,
    pub car_type: CarType,
    pub car_age: i32,
    pub base_price: f64,
    pub final_price: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub price_details: Vec<PriceDetail>,
}
