use beep_core::models::{
    account::{Guarantee, GuaranteeWithDetails, Notification, Subscription, UserCar},
    appointment::{Appointment, AppointmentWithDetails, MasterAppointment},
    catalog::{Car, Category, Service},
    master::{
        Master, MasterPaymentInfo, MasterSchedule, MasterSummary, MasterWork, Review,
        ReviewWithUser, VerificationStatus,
    },
    user::User,
};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUser {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub photo_url: Option<String>,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DbUser> for User {
    fn from(user: DbUser) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            photo_url: user.photo_url,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbCategory {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<DbCategory> for Category {
    fn from(category: DbCategory) -> Self {
        Self {
            id: category.id,
            name: category.name,
            description: category.description,
            created_at: category.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbService {
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

impl From<DbService> for Service {
    fn from(service: DbService) -> Self {
        Self {
            id: service.id,
            category_id: service.category_id,
            name: service.name,
            description: service.description,
            base_price: service.base_price,
            min_price: service.min_price,
            max_price: service.max_price,
            duration_minutes: service.duration_minutes,
            created_at: service.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbCar {
    pub id: i32,
    pub brand: String,
    pub model: String,
    pub year: i32,
    #[sqlx(rename = "type")]
    pub car_type: String,
}

impl TryFrom<DbCar> for Car {
    type Error = eyre::Report;

    fn try_from(car: DbCar) -> Result<Self, Self::Error> {
        Ok(Self {
            id: car.id,
            brand: car.brand,
            model: car.model,
            year: car.year,
            car_type: car.car_type.parse()?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbMaster {
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

impl From<DbMaster> for Master {
    fn from(master: DbMaster) -> Self {
        Self {
            id: master.id,
            user_id: master.user_id,
            name: master.name,
            email: master.email,
            phone: master.phone,
            specialization: master.specialization,
            rating: master.rating,
            photo_url: master.photo_url,
            location_lat: master.location_lat,
            location_lng: master.location_lng,
            address: master.address,
            created_at: master.created_at,
            updated_at: master.updated_at,
        }
    }
}

/// Listing row: a master with its review and work counters.
#[derive(Debug, Clone, FromRow)]
pub struct DbMasterSummary {
    #[sqlx(flatten)]
    pub master: DbMaster,
    pub review_count: i64,
    pub work_count: i64,
    pub is_favorite: bool,
}

impl From<DbMasterSummary> for MasterSummary {
    fn from(row: DbMasterSummary) -> Self {
        let verification =
            VerificationStatus::evaluate(row.review_count, row.master.rating, row.work_count);
        Self {
            master: row.master.into(),
            is_verified: verification.is_verified,
            review_count: row.review_count,
            work_count: row.work_count,
            is_favorite: row.is_favorite,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbMasterSchedule {
    pub id: i32,
    pub master_id: i32,
    pub day_of_week: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl DbMasterSchedule {
    pub fn window(&self) -> (NaiveTime, NaiveTime) {
        (self.start_time, self.end_time)
    }
}

impl From<DbMasterSchedule> for MasterSchedule {
    fn from(row: DbMasterSchedule) -> Self {
        Self {
            id: row.id,
            master_id: row.master_id,
            day_of_week: row.day_of_week,
            start_time: row.start_time,
            end_time: row.end_time,
            is_active: row.is_active,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointment {
    pub id: i32,
    pub user_id: i32,
    pub master_id: i32,
    pub service_id: i32,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub status: String,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<DbAppointment> for Appointment {
    type Error = eyre::Report;

    fn try_from(row: DbAppointment) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            master_id: row.master_id,
            service_id: row.service_id,
            date: row.date,
            time: row.time,
            status: row.status.parse()?,
            comment: row.comment,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct DbAppointmentWithDetails {
    #[sqlx(flatten)]
    pub appointment: DbAppointment,
    pub service_name: Option<String>,
    pub master_name: Option<String>,
}

impl TryFrom<DbAppointmentWithDetails> for AppointmentWithDetails {
    type Error = eyre::Report;

    fn try_from(row: DbAppointmentWithDetails) -> Result<Self, Self::Error> {
        Ok(Self {
            appointment: row.appointment.try_into()?,
            service_name: row.service_name,
            master_name: row.master_name,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct DbMasterAppointment {
    #[sqlx(flatten)]
    pub appointment: DbAppointment,
    pub service_name: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
}

impl TryFrom<DbMasterAppointment> for MasterAppointment {
    type Error = eyre::Report;

    fn try_from(row: DbMasterAppointment) -> Result<Self, Self::Error> {
        Ok(Self {
            appointment: row.appointment.try_into()?,
            service_name: row.service_name,
            customer_name: row.customer_name,
            customer_email: row.customer_email,
            customer_phone: row.customer_phone,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbMasterWork {
    pub id: i32,
    pub master_id: i32,
    pub title: String,
    pub work_date: NaiveDate,
    pub customer_name: String,
    pub amount: Option<f64>,
    pub photo_urls: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
}

impl From<DbMasterWork> for MasterWork {
    fn from(work: DbMasterWork) -> Self {
        Self {
            id: work.id,
            master_id: work.master_id,
            title: work.title,
            work_date: work.work_date,
            customer_name: work.customer_name,
            amount: work.amount,
            photo_urls: work.photo_urls.unwrap_or_default(),
            created_at: work.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbPaymentInfo {
    pub id: i32,
    pub master_id: i32,
    pub kaspi_card: Option<String>,
    pub freedom_card: Option<String>,
    pub halyk_card: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DbPaymentInfo> for MasterPaymentInfo {
    fn from(info: DbPaymentInfo) -> Self {
        Self {
            id: info.id,
            master_id: info.master_id,
            kaspi_card: info.kaspi_card,
            freedom_card: info.freedom_card,
            halyk_card: info.halyk_card,
            created_at: info.created_at,
            updated_at: info.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbReview {
    pub id: i32,
    pub master_id: i32,
    pub user_id: i32,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<DbReview> for Review {
    fn from(review: DbReview) -> Self {
        Self {
            id: review.id,
            master_id: review.master_id,
            user_id: review.user_id,
            rating: review.rating,
            comment: review.comment,
            created_at: review.created_at,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct DbReviewWithUser {
    #[sqlx(flatten)]
    pub review: DbReview,
    pub user_name: String,
}

impl From<DbReviewWithUser> for ReviewWithUser {
    fn from(row: DbReviewWithUser) -> Self {
        Self {
            review: row.review.into(),
            user_name: row.user_name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSubscription {
    pub id: i32,
    pub user_id: i32,
    pub plan: String,
    pub trial_start_date: Option<DateTime<Utc>>,
    pub trial_end_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<DbSubscription> for Subscription {
    type Error = eyre::Report;

    fn try_from(row: DbSubscription) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            plan: row.plan.parse()?,
            trial_start_date: row.trial_start_date,
            trial_end_date: row.trial_end_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUserCar {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub year: Option<i32>,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DbUserCar> for UserCar {
    fn from(car: DbUserCar) -> Self {
        Self {
            id: car.id,
            user_id: car.user_id,
            name: car.name,
            year: car.year,
            comment: car.comment,
            created_at: car.created_at,
            updated_at: car.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbGuarantee {
    pub id: i32,
    pub user_id: i32,
    pub appointment_id: i32,
    pub service_name: String,
    pub master_name: Option<String>,
    pub service_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl From<DbGuarantee> for Guarantee {
    fn from(row: DbGuarantee) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            appointment_id: row.appointment_id,
            service_name: row.service_name,
            master_name: row.master_name,
            service_date: row.service_date,
            expiry_date: row.expiry_date,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct DbGuaranteeWithDetails {
    #[sqlx(flatten)]
    pub guarantee: DbGuarantee,
    pub appointment_date: Option<NaiveDate>,
    pub appointment_time: Option<NaiveTime>,
    pub appointment_status: Option<String>,
}

impl From<DbGuaranteeWithDetails> for GuaranteeWithDetails {
    fn from(row: DbGuaranteeWithDetails) -> Self {
        Self {
            guarantee: row.guarantee.into(),
            appointment_date: row.appointment_date,
            appointment_time: row.appointment_time,
            appointment_status: row.appointment_status,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbNotification {
    pub id: i32,
    pub user_id: i32,
    #[sqlx(rename = "type")]
    pub kind: String,
    pub title: String,
    pub message: Option<String>,
    pub related_id: Option<i32>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<DbNotification> for Notification {
    fn from(row: DbNotification) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            kind: row.kind,
            title: row.title,
            message: row.message,
            related_id: row.related_id,
            is_read: row.is_read,
            created_at: row.created_at,
        }
    }
}
