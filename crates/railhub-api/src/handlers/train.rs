//! Train handlers — creation, capacity additions, availability.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;
use validator::Validate;

use railhub_entity::train::model::CreateTrain;

use crate::dto::request::{AddSeatsRequest, CreateTrainRequest};
use crate::dto::response::{ApiResponse, TrainResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::middleware::rbac::require_admin;
use crate::state::AppState;

/// POST /api/trains (admin)
pub async fn create_train(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateTrainRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TrainResponse>>), ApiError> {
    require_admin(&auth)?;
    req.validate()?;

    let train = state
        .train_service
        .create_train(CreateTrain {
            train_name: req.train_name,
            source: req.source,
            destination: req.destination,
            total_seats: req.total_seats,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(train.into()))))
}

/// PUT /api/trains/{id}/seats (admin)
pub async fn add_seats(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(train_id): Path<Uuid>,
    Json(req): Json<AddSeatsRequest>,
) -> Result<Json<ApiResponse<TrainResponse>>, ApiError> {
    require_admin(&auth)?;
    req.validate()?;

    let train = state
        .train_service
        .add_seats(train_id, req.seats_to_add)
        .await?;

    Ok(Json(ApiResponse::ok(train.into())))
}

/// GET /api/trains/availability
pub async fn availability(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<TrainResponse>>>, ApiError> {
    let trains = state.train_service.list_availability().await?;
    Ok(Json(ApiResponse::ok(
        trains.into_iter().map(TrainResponse::from).collect(),
    )))
}
