//! The booking engine's error taxonomy.
//!
//! Every failure mode of a grant or cancellation is a distinct variant, so
//! the API layer can map each to a stable response. Storage-layer faults
//! are opaque: a caller seeing [`BookingError::Storage`] must not assume
//! the operation happened.

use thiserror::Error;

use railhub_core::error::{AppError, ErrorKind};

/// Postgres SQLSTATE for `lock_not_available`, raised when a `lock_timeout`
/// fires while waiting on a contended train row.
const LOCK_NOT_AVAILABLE: &str = "55P03";

/// Errors returned by [`BookingEngine`](super::BookingEngine) operations.
#[derive(Debug, Error)]
pub enum BookingError {
    /// The requested train does not exist.
    #[error("train not found")]
    TrainNotFound,
    /// The train has fewer seats available than requested.
    #[error("insufficient seat availability: {available} available, {requested} requested")]
    InsufficientSeats {
        /// Seats actually available at decision time.
        available: i32,
        /// Seats the caller asked for.
        requested: i32,
    },
    /// The user already booked this train today.
    #[error("only one booking per train per day is allowed")]
    DailyLimitReached,
    /// Lost a race with a concurrent operation on the same train.
    #[error("seats were claimed by a concurrent booking")]
    ConcurrentConflict,
    /// The booking does not exist or belongs to another user.
    #[error("booking not found")]
    BookingNotFound,
    /// The booking was already cancelled.
    #[error("booking is already cancelled")]
    AlreadyCancelled,
    /// The cancellation window has elapsed.
    #[error("booking can no longer be cancelled")]
    WindowExpired,
    /// An underlying storage fault. The operation's outcome is unknown to
    /// the caller and must not be treated as success.
    #[error(transparent)]
    Storage(#[from] AppError),
}

impl BookingError {
    /// Map a raw sqlx error out of the engine's critical section.
    ///
    /// A lock-wait timeout on the train row surfaces as
    /// [`BookingError::ConcurrentConflict`]; everything else is an opaque
    /// storage fault.
    pub(crate) fn from_sqlx(context: &str, err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if db.code().as_deref() == Some(LOCK_NOT_AVAILABLE) {
                return Self::ConcurrentConflict;
            }
        }
        Self::Storage(AppError::with_source(ErrorKind::Database, context, err))
    }

    /// Whether this failure is correctable by the client (4xx-equivalent).
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Storage(_))
    }
}
