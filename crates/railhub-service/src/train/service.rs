//! Train administration — creation, capacity additions, availability.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use railhub_core::error::AppError;
use railhub_core::result::AppResult;
use railhub_database::repositories::train::TrainRepository;
use railhub_entity::train::model::CreateTrain;
use railhub_entity::train::Train;

/// Handles train administration and read paths.
#[derive(Debug, Clone)]
pub struct TrainService {
    /// Train repository.
    trains: Arc<TrainRepository>,
}

impl TrainService {
    /// Creates a new train service.
    pub fn new(trains: Arc<TrainRepository>) -> Self {
        Self { trains }
    }

    /// Creates a new train with all seats available.
    pub async fn create_train(&self, data: CreateTrain) -> AppResult<Train> {
        if data.train_name.trim().chars().count() < 3 {
            return Err(AppError::validation(
                "Train name must be at least 3 characters long",
            ));
        }
        if data.source.trim().is_empty() || data.destination.trim().is_empty() {
            return Err(AppError::validation(
                "Source and destination stations are required",
            ));
        }
        if data.source.trim().eq_ignore_ascii_case(data.destination.trim()) {
            return Err(AppError::validation(
                "Source and destination cannot be the same",
            ));
        }
        if data.total_seats < 1 {
            return Err(AppError::validation(
                "Total seats must be greater than zero",
            ));
        }

        let train = self.trains.create(&data).await?;

        info!(
            train_id = %train.id,
            train_name = %train.train_name,
            total_seats = train.total_seats,
            "Train created"
        );

        Ok(train)
    }

    /// Adds seats to an existing train, growing both total and available
    /// capacity together.
    pub async fn add_seats(&self, train_id: Uuid, seats: i32) -> AppResult<Train> {
        if seats < 1 {
            return Err(AppError::validation(
                "Seats to add must be greater than zero",
            ));
        }

        let train = self
            .trains
            .add_seats(train_id, seats)
            .await?
            .ok_or_else(|| AppError::not_found("Train not found"))?;

        info!(
            train_id = %train.id,
            added = seats,
            total_seats = train.total_seats,
            "Train capacity increased"
        );

        Ok(train)
    }

    /// Lists all trains with their current availability.
    pub async fn list_availability(&self) -> AppResult<Vec<Train>> {
        self.trains.find_all().await
    }
}
