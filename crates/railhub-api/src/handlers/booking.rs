//! Booking handlers — grant, history, cancellation.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;
use validator::Validate;

use railhub_core::error::AppError;

use crate::dto::request::{BookSeatsRequest, HistoryParams};
use crate::dto::response::{
    ApiResponse, BookingConfirmationResponse, BookingHistoryItem, BookingHistoryResponse,
    CancellationResponse,
};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Default number of history rows returned.
const DEFAULT_HISTORY_LIMIT: i64 = 50;
/// Upper bound on history rows per request.
const MAX_HISTORY_LIMIT: i64 = 100;

/// POST /api/bookings
pub async fn book_seats(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<BookSeatsRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BookingConfirmationResponse>>), ApiError> {
    req.validate()?;

    let max_seats = state.config.booking.max_seats_per_booking;
    if req.seats_to_book > max_seats {
        return Err(AppError::validation(format!(
            "Maximum {max_seats} seats can be booked in a single transaction"
        ))
        .into());
    }

    let confirmation = state
        .booking_engine
        .book(auth.user_id, req.train_id, req.seats_to_book)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(confirmation.into())),
    ))
}

/// GET /api/bookings/my-bookings
pub async fn my_bookings(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<HistoryParams>,
) -> Result<Json<ApiResponse<BookingHistoryResponse>>, ApiError> {
    let limit = params
        .limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT);

    let views = state
        .booking_repo
        .find_history_for_user(auth.user_id, limit)
        .await?;

    let total_seats_booked: i64 = views
        .iter()
        .filter(|v| !v.cancelled)
        .map(|v| v.seats as i64)
        .sum();

    let bookings: Vec<BookingHistoryItem> =
        views.into_iter().map(BookingHistoryItem::from).collect();

    Ok(Json(ApiResponse::ok(BookingHistoryResponse {
        total_bookings: bookings.len(),
        total_seats_booked,
        bookings,
    })))
}

/// DELETE /api/bookings/{id}
pub async fn cancel_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<ApiResponse<CancellationResponse>>, ApiError> {
    let receipt = state.booking_engine.cancel(auth.user_id, booking_id).await?;

    Ok(Json(ApiResponse::ok(CancellationResponse {
        booking_id: receipt.booking_id,
        refunded_seats: receipt.seats_restored,
    })))
}
