//! Railhub Server — train seat reservation platform.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use railhub_core::config::AppConfig;
use railhub_core::error::AppError;

#[tokio::main]
async fn main() {
    let env = std::env::var("RAILHUB_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Railhub v{}", env!("CARGO_PKG_VERSION"));

    // ── Database connection + migrations ─────────────────────────
    let db = railhub_database::connection::DatabasePool::connect(&config.database).await?;
    let db_pool = db.into_pool();

    railhub_database::migration::run_migrations(&db_pool).await?;

    // ── Repositories ─────────────────────────────────────────────
    let user_repo = Arc::new(railhub_database::repositories::user::UserRepository::new(
        db_pool.clone(),
    ));
    let train_repo = Arc::new(railhub_database::repositories::train::TrainRepository::new(
        db_pool.clone(),
    ));
    let booking_repo = Arc::new(
        railhub_database::repositories::booking::BookingRepository::new(db_pool.clone()),
    );

    // ── Auth ─────────────────────────────────────────────────────
    let password_hasher = Arc::new(railhub_auth::password::PasswordHasher::new());
    let password_validator =
        railhub_auth::password::PasswordValidator::new(config.auth.password_min_length);
    let jwt_encoder = Arc::new(railhub_auth::jwt::JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(railhub_auth::jwt::JwtDecoder::new(&config.auth));

    // ── Services ─────────────────────────────────────────────────
    let user_service = Arc::new(railhub_service::user::UserService::new(
        Arc::clone(&user_repo),
        Arc::clone(&password_hasher),
        password_validator,
        Arc::clone(&jwt_encoder),
    ));
    let train_service = Arc::new(railhub_service::train::TrainService::new(Arc::clone(
        &train_repo,
    )));
    let booking_engine = Arc::new(railhub_service::booking::BookingEngine::new(
        db_pool.clone(),
        Arc::clone(&train_repo),
        Arc::clone(&booking_repo),
        config.booking.clone(),
    ));

    // ── HTTP server ──────────────────────────────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let app_state = railhub_api::state::AppState {
        config: Arc::new(config),
        db_pool,
        jwt_decoder,
        user_service,
        train_service,
        booking_engine,
        booking_repo,
    };

    let app = railhub_api::router::build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Railhub server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("Railhub server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
