//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use railhub_entity::booking::BookingView;
use railhub_entity::train::Train;
use railhub_entity::user::User;
use railhub_service::booking::BookingConfirmation;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// User summary for responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Username.
    pub username: String,
    /// Email.
    pub email: String,
    /// Role.
    pub role: String,
    /// Created at.
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role.to_string(),
            created_at: user.created_at,
        }
    }
}

/// Registration response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// The new user's ID.
    pub user_id: Uuid,
}

/// Login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Signed access token.
    pub token: String,
    /// Token expiration.
    pub expires_at: DateTime<Utc>,
    /// User info.
    pub user: UserResponse,
}

/// Train availability row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainResponse {
    /// Train ID.
    pub id: Uuid,
    /// Train display name.
    pub train_name: String,
    /// Origin station.
    pub source: String,
    /// Destination station.
    pub destination: String,
    /// Total seats.
    pub total_seats: i32,
    /// Seats still available.
    pub available_seats: i32,
}

impl From<Train> for TrainResponse {
    fn from(train: Train) -> Self {
        Self {
            id: train.id,
            train_name: train.train_name,
            source: train.source,
            destination: train.destination,
            total_seats: train.total_seats,
            available_seats: train.available_seats,
        }
    }
}

/// Booking confirmation response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfirmationResponse {
    /// Booking ID.
    pub booking_id: Uuid,
    /// Train ID.
    pub train_id: Uuid,
    /// Train display name.
    pub train_name: String,
    /// Origin station.
    pub source: String,
    /// Destination station.
    pub destination: String,
    /// Seats booked.
    pub seats_booked: i32,
    /// When the booking was recorded.
    pub booking_date: DateTime<Utc>,
}

impl From<BookingConfirmation> for BookingConfirmationResponse {
    fn from(c: BookingConfirmation) -> Self {
        Self {
            booking_id: c.booking_id,
            train_id: c.train_id,
            train_name: c.train_name,
            source: c.source,
            destination: c.destination,
            seats_booked: c.seats,
            booking_date: c.booked_at,
        }
    }
}

/// One row of a user's booking history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingHistoryItem {
    /// Booking ID.
    pub id: Uuid,
    /// Train ID.
    pub train_id: Uuid,
    /// Train display name.
    pub train_name: String,
    /// Origin station.
    pub source: String,
    /// Destination station.
    pub destination: String,
    /// Seats booked.
    pub seats_booked: i32,
    /// When the booking was made.
    pub booking_date: DateTime<Utc>,
    /// Whether the booking has been cancelled.
    pub cancelled: bool,
}

impl From<BookingView> for BookingHistoryItem {
    fn from(view: BookingView) -> Self {
        Self {
            id: view.id,
            train_id: view.train_id,
            train_name: view.train_name,
            source: view.source,
            destination: view.destination,
            seats_booked: view.seats,
            booking_date: view.booked_at,
            cancelled: view.cancelled,
        }
    }
}

/// Booking history response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingHistoryResponse {
    /// Number of bookings returned.
    pub total_bookings: usize,
    /// Sum of seats across the returned active (non-cancelled) bookings.
    pub total_seats_booked: i64,
    /// Booking rows, newest first.
    pub bookings: Vec<BookingHistoryItem>,
}

/// Cancellation response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancellationResponse {
    /// The cancelled booking's ID.
    pub booking_id: Uuid,
    /// Seats returned to the train.
    pub refunded_seats: i32,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Version.
    pub version: String,
    /// Database status.
    pub database: String,
}
