//! The seat allocation engine.
//!
//! All mutations of a train's seat ledger go through this engine. Each
//! grant or cancellation runs as one database transaction that takes an
//! exclusive row lock on the train (`SELECT ... FOR UPDATE`), so two
//! operations on the same train never interleave their critical sections;
//! operations on different trains proceed in parallel. A `lock_timeout` is
//! applied per transaction so a contended operation fails with
//! [`BookingError::ConcurrentConflict`] instead of waiting forever.
//!
//! Invariant maintained at every commit point: a train's
//! `available_seats` equals `total_seats` minus the seats of its
//! non-cancelled bookings.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};
use tracing::info;
use uuid::Uuid;

use railhub_core::config::booking::BookingConfig;
use railhub_core::error::AppError;
use railhub_database::repositories::booking::BookingRepository;
use railhub_database::repositories::train::TrainRepository;

use super::error::BookingError;

/// Result of a successful grant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfirmation {
    /// The new booking's ID.
    pub booking_id: Uuid,
    /// The train booked.
    pub train_id: Uuid,
    /// Train display name.
    pub train_name: String,
    /// Origin station.
    pub source: String,
    /// Destination station.
    pub destination: String,
    /// Seats granted.
    pub seats: i32,
    /// When the booking was recorded.
    pub booked_at: DateTime<Utc>,
}

/// Result of a successful cancellation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancellationReceipt {
    /// The cancelled booking's ID.
    pub booking_id: Uuid,
    /// Seats returned to the train.
    pub seats_restored: i32,
}

/// Atomic grant and cancellation of train seats.
#[derive(Debug, Clone)]
pub struct BookingEngine {
    /// Pool used to open per-operation transactions.
    pool: PgPool,
    /// Seat ledger access.
    trains: Arc<TrainRepository>,
    /// Allocation log access.
    bookings: Arc<BookingRepository>,
    /// Policy knobs (cancellation window, lock timeout).
    policy: BookingConfig,
}

impl BookingEngine {
    /// Creates a new booking engine.
    pub fn new(
        pool: PgPool,
        trains: Arc<TrainRepository>,
        bookings: Arc<BookingRepository>,
        policy: BookingConfig,
    ) -> Self {
        Self {
            pool,
            trains,
            bookings,
            policy,
        }
    }

    /// Book `seats` seats on `train_id` for `user_id`.
    ///
    /// The caller layer has already validated the seat count against the
    /// per-request maximum; this method enforces everything that needs the
    /// ledger: train existence, availability, and the one-booking-per-
    /// train-per-day rule. On any failure the transaction rolls back and
    /// no partial state is visible.
    pub async fn book(
        &self,
        user_id: Uuid,
        train_id: Uuid,
        seats: i32,
    ) -> Result<BookingConfirmation, BookingError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| BookingError::from_sqlx("Failed to open booking transaction", e))?;
        self.apply_lock_timeout(&mut tx).await?;

        // Serialization point: every decision below happens under this lock.
        let train = self
            .trains
            .find_for_update(&mut tx, train_id)
            .await
            .map_err(|e| BookingError::from_sqlx("Failed to lock train row", e))?
            .ok_or(BookingError::TrainNotFound)?;

        if train.available_seats < seats {
            return Err(BookingError::InsufficientSeats {
                available: train.available_seats,
                requested: seats,
            });
        }

        let booked_today = self
            .bookings
            .exists_active_today(&mut tx, user_id, train_id)
            .await
            .map_err(|e| BookingError::from_sqlx("Failed to check daily booking limit", e))?;
        if booked_today {
            return Err(BookingError::DailyLimitReached);
        }

        let booking = self
            .bookings
            .insert(&mut tx, user_id, train_id, seats)
            .await
            .map_err(|e| BookingError::from_sqlx("Failed to record booking", e))?;

        // Re-checked decrement: under FOR UPDATE this cannot miss, but the
        // guard keeps the ledger safe even if isolation is ever weakened.
        let updated = self
            .trains
            .take_seats(&mut tx, train_id, seats)
            .await
            .map_err(|e| BookingError::from_sqlx("Failed to decrement seat availability", e))?;
        if updated == 0 {
            return Err(BookingError::ConcurrentConflict);
        }

        tx.commit()
            .await
            .map_err(|e| BookingError::from_sqlx("Failed to commit booking", e))?;

        info!(
            booking_id = %booking.id,
            user_id = %user_id,
            train_id = %train_id,
            seats,
            remaining = train.available_seats - seats,
            "Seats booked"
        );

        Ok(BookingConfirmation {
            booking_id: booking.id,
            train_id,
            train_name: train.train_name,
            source: train.source,
            destination: train.destination,
            seats,
            booked_at: booking.booked_at,
        })
    }

    /// Cancel booking `booking_id` on behalf of `user_id`, restoring its
    /// seats to the train.
    ///
    /// A missing booking and someone else's booking produce the same
    /// [`BookingError::BookingNotFound`], so callers cannot probe for other
    /// users' bookings. The mark-cancelled and the seat restore commit
    /// together or not at all, and the `cancelled = FALSE` guard makes the
    /// restore happen exactly once across concurrent attempts.
    pub async fn cancel(
        &self,
        user_id: Uuid,
        booking_id: Uuid,
    ) -> Result<CancellationReceipt, BookingError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| BookingError::from_sqlx("Failed to open cancellation transaction", e))?;
        self.apply_lock_timeout(&mut tx).await?;

        let booking = self
            .bookings
            .find_by_id_in_tx(&mut tx, booking_id)
            .await
            .map_err(|e| BookingError::from_sqlx("Failed to look up booking", e))?
            .filter(|b| b.user_id == user_id)
            .ok_or(BookingError::BookingNotFound)?;

        if booking.cancelled {
            return Err(BookingError::AlreadyCancelled);
        }

        if window_expired(
            booking.booked_at,
            Utc::now(),
            self.policy.cancellation_window_minutes,
        ) {
            return Err(BookingError::WindowExpired);
        }

        // Serialize against grants on the same train before touching the
        // ledger.
        self.trains
            .find_for_update(&mut tx, booking.train_id)
            .await
            .map_err(|e| BookingError::from_sqlx("Failed to lock train row", e))?
            .ok_or_else(|| {
                BookingError::Storage(AppError::internal("Booking references a missing train"))
            })?;

        let marked = self
            .bookings
            .mark_cancelled(&mut tx, booking.id)
            .await
            .map_err(|e| BookingError::from_sqlx("Failed to mark booking cancelled", e))?;
        if marked == 0 {
            return Err(BookingError::AlreadyCancelled);
        }

        let restored = self
            .trains
            .restore_seats(&mut tx, booking.train_id, booking.seats)
            .await
            .map_err(|e| BookingError::from_sqlx("Failed to restore seat availability", e))?;
        if restored == 0 {
            return Err(BookingError::Storage(AppError::internal(
                "Seat restore would exceed train capacity",
            )));
        }

        tx.commit()
            .await
            .map_err(|e| BookingError::from_sqlx("Failed to commit cancellation", e))?;

        info!(
            booking_id = %booking.id,
            user_id = %user_id,
            train_id = %booking.train_id,
            seats = booking.seats,
            "Booking cancelled"
        );

        Ok(CancellationReceipt {
            booking_id: booking.id,
            seats_restored: booking.seats,
        })
    }

    /// Bound the row-lock wait for this transaction.
    async fn apply_lock_timeout(&self, conn: &mut PgConnection) -> Result<(), BookingError> {
        // lock_timeout does not accept a bind parameter.
        let stmt = format!("SET LOCAL lock_timeout = '{}ms'", self.policy.lock_timeout_ms);
        sqlx::query(&stmt)
            .execute(conn)
            .await
            .map_err(|e| BookingError::from_sqlx("Failed to set lock timeout", e))?;
        Ok(())
    }
}

/// Whether `now` is past the cancellation window that started at
/// `booked_at`.
fn window_expired(booked_at: DateTime<Utc>, now: DateTime<Utc>, window_minutes: i64) -> bool {
    now.signed_duration_since(booked_at) > chrono::Duration::minutes(window_minutes)
}
