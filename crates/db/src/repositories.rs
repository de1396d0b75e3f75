pub mod appointment;
pub mod catalog;
pub mod favorite;
pub mod guarantee;
pub mod master;
pub mod notification;
pub mod payment;
pub mod review;
pub mod schedule;
pub mod subscription;
pub mod user;
pub mod user_car;
pub mod work;
