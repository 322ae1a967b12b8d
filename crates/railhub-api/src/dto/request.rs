//! Request DTOs with validation.
//!
//! Shape validation (required fields, lengths, ranges) happens here; the
//! booking engine receives already-validated parameters and only enforces
//! what needs the ledger.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Desired username.
    #[validate(length(min = 3, max = 50, message = "Username must be at least 3 characters long"))]
    pub username: String,
    /// Email address.
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    /// Plaintext password (strength rules enforced by the user service).
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Create train request (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTrainRequest {
    /// Train display name.
    #[validate(length(
        min = 3,
        max = 100,
        message = "Train name must be at least 3 characters long"
    ))]
    pub train_name: String,
    /// Origin station.
    #[validate(length(min = 1, max = 50, message = "Source station is required"))]
    pub source: String,
    /// Destination station.
    #[validate(length(min = 1, max = 50, message = "Destination station is required"))]
    pub destination: String,
    /// Total seats on the train.
    #[validate(range(min = 1, message = "Total seats must be greater than zero"))]
    pub total_seats: i32,
}

/// Add seats request (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddSeatsRequest {
    /// Seats to add to the train's capacity.
    #[validate(range(min = 1, message = "Seats to add must be greater than zero"))]
    pub seats_to_add: i32,
}

/// Book seats request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BookSeatsRequest {
    /// The train to book on.
    pub train_id: Uuid,
    /// Number of seats to book. The per-request maximum comes from
    /// configuration and is checked in the handler.
    #[validate(range(min = 1, message = "Number of seats must be greater than zero"))]
    pub seats_to_book: i32,
}

/// Query parameters for the booking history endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryParams {
    /// Maximum number of bookings to return (default 50, max 100).
    pub limit: Option<i64>,
}
