//! Customer account data: subscriptions, favorites, own cars, guarantees
//! and notifications.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::BeepError;

pub const TRIAL_DAYS: i64 = 7;
pub const GUARANTEE_DAYS: i64 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionPlan {
    Basic,
    Premium,
    Trial,
}

impl SubscriptionPlan {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionPlan::Basic => "basic",
            SubscriptionPlan::Premium => "premium",
            SubscriptionPlan::Trial => "trial",
        }
    }
}

impl fmt::Display for SubscriptionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubscriptionPlan {
    type Err = BeepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(SubscriptionPlan::Basic),
            "premium" => Ok(SubscriptionPlan::Premium),
            "trial" => Ok(SubscriptionPlan::Trial),
            _ => Err(BeepError::Validation(
                "Invalid plan. Must be 'basic', 'premium' or 'trial'".to_string(),
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    pub id: i32,
    pub user_id: i32,
    pub plan: SubscriptionPlan,
    pub trial_start_date: Option<DateTime<Utc>>,
    pub trial_end_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSubscriptionRequest {
    pub plan: String,
}

/// Start and end of a trial beginning at `start`.
pub fn trial_window(start: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    (start, start + Duration::days(TRIAL_DAYS))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteMasterRequest {
    pub master_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCar {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub year: Option<i32>,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCarRequest {
    pub name: String,
    pub year: Option<i32>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Guarantee {
    pub id: i32,
    pub user_id: i32,
    pub appointment_id: i32,
    pub service_name: String,
    pub master_name: Option<String>,
    pub service_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuaranteeWithDetails {
    #[serde(flatten)]
    pub guarantee: Guarantee,
    pub appointment_date: Option<NaiveDate>,
    #[serde(default, with = "optional_clock")]
    pub appointment_time: Option<NaiveTime>,
    pub appointment_status: Option<String>,
}

/// Guarantees run for [`GUARANTEE_DAYS`] after the service date.
pub fn guarantee_expiry(service_date: NaiveDate) -> NaiveDate {
    service_date + Duration::days(GUARANTEE_DAYS)
}

pub const NOTIFICATION_APPOINTMENT_CREATED: &str = "appointment_created";
pub const NOTIFICATION_APPOINTMENT_UPDATED: &str = "appointment_updated";
pub const NOTIFICATION_APPOINTMENT_CANCELLED: &str = "appointment_cancelled";
pub const NOTIFICATION_GUARANTEE_ISSUED: &str = "guarantee_issued";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: i32,
    pub user_id: i32,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub message: Option<String>,
    pub related_id: Option<i32>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

mod optional_clock {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    use crate::models::clock::{format_clock, parse_clock};

    pub fn serialize<S>(time: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match time {
            Some(time) => serializer.serialize_some(&format_clock(*time)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| parse_clock(&raw).map_err(de::Error::custom))
            .transpose()
    }
}
