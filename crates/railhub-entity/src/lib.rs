//! # railhub-entity
//!
//! Domain entity models for Railhub: users, trains, and bookings, mapped
//! to their PostgreSQL rows via `sqlx::FromRow`.

pub mod booking;
pub mod train;
pub mod user;
