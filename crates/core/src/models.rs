pub mod account;
pub mod appointment;
pub mod catalog;
pub mod clock;
pub mod master;
pub mod user;
