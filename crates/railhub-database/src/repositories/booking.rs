//! Booking repository implementation.
//!
//! Bookings are the allocation log: rows are inserted by grants and marked
//! cancelled by reversals, never deleted. The transactional methods take
//! `&mut PgConnection` and commit together with the ledger update that
//! belongs to them.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use railhub_core::error::{AppError, ErrorKind};
use railhub_core::result::AppResult;
use railhub_entity::booking::{Booking, BookingView};

/// Repository for booking inserts, lookups, and history queries.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    /// Create a new booking repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a booking by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Booking>> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find booking", e))
    }

    /// List a user's bookings joined with train details, newest first.
    pub async fn find_history_for_user(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> AppResult<Vec<BookingView>> {
        sqlx::query_as::<_, BookingView>(
            "SELECT b.id, b.train_id, t.train_name, t.source, t.destination, \
                    b.seats, b.booked_at, b.cancelled \
             FROM bookings b \
             JOIN trains t ON b.train_id = t.id \
             WHERE b.user_id = $1 \
             ORDER BY b.booked_at DESC \
             LIMIT $2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list user bookings", e)
        })
    }

    /// Insert a booking inside the caller's transaction.
    pub async fn insert(
        &self,
        conn: &mut PgConnection,
        user_id: Uuid,
        train_id: Uuid,
        seats: i32,
    ) -> Result<Booking, sqlx::Error> {
        sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (user_id, train_id, seats) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(user_id)
        .bind(train_id)
        .bind(seats)
        .fetch_one(conn)
        .await
    }

    /// Fetch a booking by id inside the caller's transaction.
    pub async fn find_by_id_in_tx(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<Booking>, sqlx::Error> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Whether the user already holds an active booking on this train made
    /// on the current UTC calendar day.
    pub async fn exists_active_today(
        &self,
        conn: &mut PgConnection,
        user_id: Uuid,
        train_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS( \
                SELECT 1 FROM bookings \
                WHERE user_id = $1 AND train_id = $2 AND cancelled = FALSE \
                AND (booked_at AT TIME ZONE 'utc')::date = (now() AT TIME ZONE 'utc')::date \
             )",
        )
        .bind(user_id)
        .bind(train_id)
        .fetch_one(conn)
        .await
    }

    /// Mark a booking cancelled inside the caller's transaction.
    ///
    /// The `cancelled = FALSE` guard makes a concurrent double-cancel a
    /// no-op; zero affected rows means another transaction won.
    pub async fn mark_cancelled(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE bookings SET cancelled = TRUE, cancelled_at = now() \
             WHERE id = $1 AND cancelled = FALSE",
        )
        .bind(id)
        .execute(conn)
        .await?;
        Ok(result.rows_affected())
    }
}
