//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use railhub_auth::jwt::JwtDecoder;
use railhub_core::config::AppConfig;
use railhub_database::repositories::booking::BookingRepository;
use railhub_service::booking::BookingEngine;
use railhub_service::train::TrainService;
use railhub_service::user::UserService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,
    /// JWT token decoder and validator.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// User registration and login.
    pub user_service: Arc<UserService>,
    /// Train administration and availability.
    pub train_service: Arc<TrainService>,
    /// The seat allocation engine.
    pub booking_engine: Arc<BookingEngine>,
    /// Booking repository for read paths.
    pub booking_repo: Arc<BookingRepository>,
}
