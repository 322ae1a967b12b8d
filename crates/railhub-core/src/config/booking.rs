//! Seat booking policy configuration.

use serde::{Deserialize, Serialize};

/// Booking policy knobs consumed by the seat allocation engine and the
/// request validation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfig {
    /// Maximum number of seats a single booking may request.
    #[serde(default = "default_max_seats")]
    pub max_seats_per_booking: i32,
    /// How long after booking a cancellation is still accepted, in minutes.
    #[serde(default = "default_cancellation_window")]
    pub cancellation_window_minutes: i64,
    /// How long a grant or cancellation waits on a contended train row
    /// before giving up, in milliseconds.
    #[serde(default = "default_lock_timeout")]
    pub lock_timeout_ms: u64,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            max_seats_per_booking: default_max_seats(),
            cancellation_window_minutes: default_cancellation_window(),
            lock_timeout_ms: default_lock_timeout(),
        }
    }
}

fn default_max_seats() -> i32 {
    6
}

fn default_cancellation_window() -> i64 {
    120
}

fn default_lock_timeout() -> u64 {
    5_000
}
