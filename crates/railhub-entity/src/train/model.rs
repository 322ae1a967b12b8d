//! Train entity model.
//!
//! A train row is the seat ledger for one service: `available_seats` is the
//! single source of truth for remaining capacity and is only ever mutated
//! inside the booking engine's transactions (plus the admin capacity-add).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A train service with a fixed seat pool.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Train {
    /// Unique train identifier.
    pub id: Uuid,
    /// Display name of the service.
    pub train_name: String,
    /// Origin station.
    pub source: String,
    /// Destination station.
    pub destination: String,
    /// Total seats on this train. Invariant: `>= 1`.
    pub total_seats: i32,
    /// Seats still open for booking. Invariant: `0 <= available <= total`.
    pub available_seats: i32,
    /// When the train was created.
    pub created_at: DateTime<Utc>,
    /// When the train row was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Train {
    /// Number of seats currently held by active bookings.
    pub fn booked_seats(&self) -> i32 {
        self.total_seats - self.available_seats
    }

    /// Whether no seats remain.
    pub fn is_sold_out(&self) -> bool {
        self.available_seats == 0
    }
}

/// Data required to create a new train.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTrain {
    /// Display name of the service.
    pub train_name: String,
    /// Origin station.
    pub source: String,
    /// Destination station.
    pub destination: String,
    /// Total (and initially available) seats.
    pub total_seats: i32,
}
