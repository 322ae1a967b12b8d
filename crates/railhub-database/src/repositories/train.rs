//! Train repository implementation — the seat ledger's data access.
//!
//! The train row is the serialization point for all seat accounting on a
//! service. Methods that participate in the booking engine's critical
//! section take `&mut PgConnection` so they can only run inside a
//! caller-owned transaction; all policy lives in the engine, not here.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use railhub_core::error::{AppError, ErrorKind};
use railhub_core::result::AppResult;
use railhub_entity::train::model::CreateTrain;
use railhub_entity::train::Train;

/// Repository for train reads and seat-ledger updates.
#[derive(Debug, Clone)]
pub struct TrainRepository {
    pool: PgPool,
}

impl TrainRepository {
    /// Create a new train repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a train by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Train>> {
        sqlx::query_as::<_, Train>("SELECT * FROM trains WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find train", e))
    }

    /// List all trains, newest first.
    pub async fn find_all(&self) -> AppResult<Vec<Train>> {
        sqlx::query_as::<_, Train>("SELECT * FROM trains ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list trains", e))
    }

    /// Insert a new train with all seats available.
    pub async fn create(&self, data: &CreateTrain) -> AppResult<Train> {
        sqlx::query_as::<_, Train>(
            "INSERT INTO trains (train_name, source, destination, total_seats, available_seats) \
             VALUES ($1, $2, $3, $4, $4) RETURNING *",
        )
        .bind(&data.train_name)
        .bind(&data.source)
        .bind(&data.destination)
        .bind(data.total_seats)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create train", e))
    }

    /// Add seats to a train, raising total and available capacity together
    /// so the ledger invariant is preserved.
    pub async fn add_seats(&self, id: Uuid, seats: i32) -> AppResult<Option<Train>> {
        sqlx::query_as::<_, Train>(
            "UPDATE trains SET total_seats = total_seats + $1, \
             available_seats = available_seats + $1, updated_at = now() \
             WHERE id = $2 RETURNING *",
        )
        .bind(seats)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to add seats", e))
    }

    /// Read a train row under an exclusive row lock.
    ///
    /// Blocks until the lock is granted or the transaction's
    /// `lock_timeout` fires. Every grant/cancellation decision for this
    /// train must happen while this lock is held.
    pub async fn find_for_update(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<Train>, sqlx::Error> {
        sqlx::query_as::<_, Train>("SELECT * FROM trains WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Conditionally take seats from a train.
    ///
    /// The `available_seats >= $1` guard makes the decrement a no-op when
    /// availability moved under us; the caller treats zero affected rows
    /// as a conflict and aborts its transaction.
    pub async fn take_seats(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
        seats: i32,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE trains SET available_seats = available_seats - $1, updated_at = now() \
             WHERE id = $2 AND available_seats >= $1",
        )
        .bind(seats)
        .bind(id)
        .execute(conn)
        .await?;
        Ok(result.rows_affected())
    }

    /// Conditionally restore seats to a train.
    ///
    /// Guarded so a restore can never push availability past the total.
    pub async fn restore_seats(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
        seats: i32,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE trains SET available_seats = available_seats + $1, updated_at = now() \
             WHERE id = $2 AND available_seats + $1 <= total_seats",
        )
        .bind(seats)
        .bind(id)
        .execute(conn)
        .await?;
        Ok(result.rows_affected())
    }
}
