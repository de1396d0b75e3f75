use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::clock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Master {
    pub id: i32,
    pub user_id: Option<i32>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub specialization: Option<String>,
    pub rating: f64,
    pub photo_url: Option<String>,
    pub location_lat: Option<f64>,
    pub location_lng: Option<f64>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A master as shown in the public listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MasterSummary {
    #[serde(flatten)]
    pub master: Master,
    pub is_verified: bool,
    pub review_count: i64,
    pub work_count: i64,
    pub is_favorite: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMasterRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub specialization: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateMasterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub specialization: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MasterSchedule {
    pub id: i32,
    pub master_id: i32,
    /// 0 = Sunday .. 6 = Saturday
    pub day_of_week: i16,
    #[serde(with = "clock")]
    pub start_time: NaiveTime,
    #[serde(with = "clock")]
    pub end_time: NaiveTime,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleEntryRequest {
    pub day_of_week: i16,
    #[serde(with = "clock")]
    pub start_time: NaiveTime,
    #[serde(with = "clock")]
    pub end_time: NaiveTime,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableSlotsQuery {
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailableSlotsResponse {
    pub date: String,
    pub slots: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MasterWork {
    pub id: i32,
    pub master_id: i32,
    pub title: String,
    pub work_date: NaiveDate,
    pub customer_name: String,
    pub amount: Option<f64>,
    pub photo_urls: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Body for both creating and replacing a portfolio entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MasterWorkRequest {
    pub title: String,
    pub work_date: String,
    pub customer_name: String,
    pub amount: f64,
    #[serde(default)]
    pub photo_urls: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MasterPaymentInfo {
    pub id: i32,
    pub master_id: i32,
    pub kaspi_card: Option<String>,
    pub freedom_card: Option<String>,
    pub halyk_card: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePaymentInfoRequest {
    pub kaspi_card: Option<String>,
    pub freedom_card: Option<String>,
    pub halyk_card: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: i32,
    pub master_id: i32,
    pub user_id: i32,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewWithUser {
    #[serde(flatten)]
    pub review: Review,
    pub user_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReviewRequest {
    pub master_id: i32,
    pub rating: i32,
    pub comment: Option<String>,
}

pub const MIN_REVIEW_RATING: i32 = 1;
pub const MAX_REVIEW_RATING: i32 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationStatus {
    pub is_verified: bool,
    pub review_count: i64,
    pub work_count: i64,
    pub status: String,
}

/// A master counts as verified with three or more reviews, a rating above
/// 4.0, or more than two portfolio entries.
pub fn is_verified_master(review_count: i64, rating: f64, work_count: i64) -> bool {
    review_count >= 3 || rating > 4.0 || work_count > 2
}

impl VerificationStatus {
    pub fn evaluate(review_count: i64, rating: f64, work_count: i64) -> Self {
        let is_verified = is_verified_master(review_count, rating, work_count);
        Self {
            is_verified,
            review_count,
            work_count,
            status: if is_verified {
                "Verified master".to_string()
            } else {
                "Unverified".to_string()
            },
        }
    }
}
