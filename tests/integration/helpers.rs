//! Shared test helpers for integration tests.
//!
//! Database-backed tests need a reachable PostgreSQL instance; set
//! `RAILHUB_TEST_DATABASE_URL` to run them. When the variable is unset,
//! `TestApp::new()` returns `None` and tests skip themselves.

#![allow(dead_code)]

use std::str::FromStr;
use std::sync::Arc;

use axum::body::Body;
use axum::Router;
use http::{Request, StatusCode};
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use railhub_api::state::AppState;
use railhub_core::config::app::ServerConfig;
use railhub_core::config::auth::AuthConfig;
use railhub_core::config::booking::BookingConfig;
use railhub_core::config::database::DatabaseConfig;
use railhub_core::config::logging::LoggingConfig;
use railhub_core::config::AppConfig;
use railhub_database::repositories::booking::BookingRepository;
use railhub_database::repositories::train::TrainRepository;
use railhub_database::repositories::user::UserRepository;
use railhub_entity::train::model::CreateTrain;
use railhub_entity::user::model::CreateUser;
use railhub_entity::user::UserRole;
use railhub_service::booking::BookingEngine;
use railhub_service::train::TrainService;
use railhub_service::user::UserService;

/// A response captured from the test router.
pub struct TestResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Parsed JSON body (`Value::Null` when empty).
    pub body: Value,
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Database pool for direct queries
    pub db_pool: PgPool,
    /// Full application state, for driving the engine directly
    pub state: AppState,
}

impl TestApp {
    /// Create a new test application, or `None` when no test database is
    /// configured.
    pub async fn new() -> Option<Self> {
        let url = match std::env::var("RAILHUB_TEST_DATABASE_URL") {
            Ok(url) => url,
            Err(_) => {
                eprintln!("RAILHUB_TEST_DATABASE_URL not set; skipping database-backed test");
                return None;
            }
        };

        let config = AppConfig {
            server: ServerConfig::default(),
            database: DatabaseConfig {
                url,
                max_connections: 5,
                min_connections: 1,
                connect_timeout_seconds: 5,
                idle_timeout_seconds: 60,
            },
            auth: AuthConfig {
                jwt_secret: "test-secret".to_string(),
                token_ttl_minutes: 60,
                password_min_length: 8,
            },
            booking: BookingConfig::default(),
            logging: LoggingConfig::default(),
        };

        let db = railhub_database::connection::DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database");
        let db_pool = db.into_pool();

        railhub_database::migration::run_migrations(&db_pool)
            .await
            .expect("Failed to run migrations");

        let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
        let train_repo = Arc::new(TrainRepository::new(db_pool.clone()));
        let booking_repo = Arc::new(BookingRepository::new(db_pool.clone()));

        let password_hasher = Arc::new(railhub_auth::password::PasswordHasher::new());
        let password_validator =
            railhub_auth::password::PasswordValidator::new(config.auth.password_min_length);
        let jwt_encoder = Arc::new(railhub_auth::jwt::JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(railhub_auth::jwt::JwtDecoder::new(&config.auth));

        let user_service = Arc::new(UserService::new(
            Arc::clone(&user_repo),
            Arc::clone(&password_hasher),
            password_validator,
            Arc::clone(&jwt_encoder),
        ));
        let train_service = Arc::new(TrainService::new(Arc::clone(&train_repo)));
        let booking_engine = Arc::new(BookingEngine::new(
            db_pool.clone(),
            Arc::clone(&train_repo),
            Arc::clone(&booking_repo),
            config.booking.clone(),
        ));

        let state = AppState {
            config: Arc::new(config),
            db_pool: db_pool.clone(),
            jwt_decoder,
            user_service,
            train_service,
            booking_engine,
            booking_repo,
        };

        let router = railhub_api::router::build_router(state.clone());

        Some(Self {
            router,
            db_pool,
            state,
        })
    }

    /// The booking engine, for driving grants/cancellations directly.
    pub fn engine(&self) -> Arc<BookingEngine> {
        Arc::clone(&self.state.booking_engine)
    }

    /// Issue a request against the router and capture the response.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);

        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&json).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }

    /// Insert a user directly, bypassing the HTTP surface.
    pub async fn create_user(&self, username: &str, password: &str, role: &str) -> Uuid {
        let hasher = railhub_auth::password::PasswordHasher::new();
        let user_repo = UserRepository::new(self.db_pool.clone());

        let user = user_repo
            .create(&CreateUser {
                username: username.to_string(),
                email: format!("{username}@example.com"),
                password_hash: hasher.hash_password(password).unwrap(),
                role: UserRole::from_str(role).unwrap(),
            })
            .await
            .expect("Failed to create test user");

        user.id
    }

    /// Log in through the API and return the access token.
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({
                    "username": username,
                    "password": password,
                })),
                None,
            )
            .await;

        assert_eq!(response.status, StatusCode::OK, "login failed");
        response.body["data"]["token"]
            .as_str()
            .expect("missing token")
            .to_string()
    }

    /// Insert a train directly, bypassing the HTTP surface.
    pub async fn create_train(
        &self,
        name: &str,
        source: &str,
        destination: &str,
        seats: i32,
    ) -> Uuid {
        let train_repo = TrainRepository::new(self.db_pool.clone());
        let train = train_repo
            .create(&CreateTrain {
                train_name: name.to_string(),
                source: source.to_string(),
                destination: destination.to_string(),
                total_seats: seats,
            })
            .await
            .expect("Failed to create test train");
        train.id
    }

    /// Read a train's current availability straight from the ledger.
    pub async fn available_seats(&self, train_id: Uuid) -> i32 {
        sqlx::query_scalar::<_, i32>("SELECT available_seats FROM trains WHERE id = $1")
            .bind(train_id)
            .fetch_one(&self.db_pool)
            .await
            .expect("Failed to read availability")
    }

    /// Sum of seats across a train's non-cancelled bookings.
    pub async fn active_booked_seats(&self, train_id: Uuid) -> i64 {
        sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(seats), 0) FROM bookings \
             WHERE train_id = $1 AND cancelled = FALSE",
        )
        .bind(train_id)
        .fetch_one(&self.db_pool)
        .await
        .expect("Failed to sum bookings")
    }

    /// Shift a booking's timestamp into the past (for window/daily tests).
    pub async fn backdate_booking(&self, booking_id: Uuid, hours: i32) {
        sqlx::query("UPDATE bookings SET booked_at = now() - make_interval(hours => $1) WHERE id = $2")
            .bind(hours)
            .bind(booking_id)
            .execute(&self.db_pool)
            .await
            .expect("Failed to backdate booking");
    }
}

/// Append a random suffix so parallel tests never collide on unique columns.
pub fn unique(prefix: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{prefix}_{}", &suffix[..8])
}
