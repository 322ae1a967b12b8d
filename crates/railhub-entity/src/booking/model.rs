//! Booking entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A seat booking on a train.
///
/// Bookings are never deleted. Cancellation flips the `cancelled` flag and
/// restores the seats to the train in the same transaction, keeping an
/// auditable history.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    /// Unique booking identifier.
    pub id: Uuid,
    /// The user who holds this booking.
    pub user_id: Uuid,
    /// The train the seats are held on.
    pub train_id: Uuid,
    /// Number of seats held. Invariant: `>= 1`.
    pub seats: i32,
    /// When the booking was made.
    pub booked_at: DateTime<Utc>,
    /// Whether the booking has been cancelled.
    pub cancelled: bool,
    /// When the booking was cancelled, if it was.
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl Booking {
    /// Whether this booking still holds seats.
    pub fn is_active(&self) -> bool {
        !self.cancelled
    }
}

/// A booking joined with the train it was made on, for history listings.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BookingView {
    /// Booking identifier.
    pub id: Uuid,
    /// Train identifier.
    pub train_id: Uuid,
    /// Train display name.
    pub train_name: String,
    /// Origin station.
    pub source: String,
    /// Destination station.
    pub destination: String,
    /// Number of seats held.
    pub seats: i32,
    /// When the booking was made.
    pub booked_at: DateTime<Utc>,
    /// Whether the booking has been cancelled.
    pub cancelled: bool,
}
