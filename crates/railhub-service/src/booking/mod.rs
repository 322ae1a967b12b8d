//! Seat allocation: the booking engine and its error taxonomy.

pub mod engine;
pub mod error;

pub use engine::{BookingConfirmation, BookingEngine, CancellationReceipt};
pub use error::BookingError;
