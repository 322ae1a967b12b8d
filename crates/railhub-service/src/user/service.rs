//! User account operations — registration and credential checking.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use railhub_auth::jwt::JwtEncoder;
use railhub_auth::password::{PasswordHasher, PasswordValidator};
use railhub_core::error::AppError;
use railhub_core::result::AppResult;
use railhub_database::repositories::user::UserRepository;
use railhub_entity::user::model::CreateUser;
use railhub_entity::user::{User, UserRole};

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// The authenticated user.
    pub user: User,
    /// Signed access token.
    pub token: String,
    /// When the token expires.
    pub expires_at: DateTime<Utc>,
}

/// Handles registration and login.
#[derive(Debug, Clone)]
pub struct UserService {
    /// User repository.
    users: Arc<UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password strength validator.
    validator: PasswordValidator,
    /// JWT encoder.
    encoder: Arc<JwtEncoder>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        users: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        validator: PasswordValidator,
        encoder: Arc<JwtEncoder>,
    ) -> Self {
        Self {
            users,
            hasher,
            validator,
            encoder,
        }
    }

    /// Registers a new user account.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        role: UserRole,
    ) -> AppResult<User> {
        if self.users.find_by_username(username).await?.is_some()
            || self.users.find_by_email(email).await?.is_some()
        {
            return Err(AppError::conflict("Username or email already exists"));
        }

        self.validator.validate(password)?;
        let password_hash = self.hasher.hash_password(password)?;

        let user = self
            .users
            .create(&CreateUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
                role,
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(user)
    }

    /// Checks credentials and issues an access token.
    ///
    /// Unknown usernames and wrong passwords produce the same error so the
    /// response does not reveal which accounts exist.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<LoginOutcome> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid credentials"))?;

        let valid = self.hasher.verify_password(password, &user.password_hash)?;
        if !valid {
            return Err(AppError::unauthorized("Invalid credentials"));
        }

        let (token, expires_at) = self.encoder.generate_token(&user)?;

        info!(user_id = %user.id, username = %user.username, "User logged in");

        Ok(LoginOutcome {
            user,
            token,
            expires_at,
        })
    }

    /// Fetches a user's profile by id.
    pub async fn get_profile(&self, user_id: uuid::Uuid) -> AppResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}
