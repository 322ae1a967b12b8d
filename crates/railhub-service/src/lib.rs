//! # railhub-service
//!
//! Business logic for Railhub. The centerpiece is the [`booking::BookingEngine`],
//! which owns all seat-ledger mutations; [`train::TrainService`] and
//! [`user::UserService`] cover train administration and account handling.

pub mod booking;
pub mod context;
pub mod train;
pub mod user;
