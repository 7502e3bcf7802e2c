//! Domain service for authentication and the owner's profile.
//!
//! Handles login credential checks, display-user lookup, and profile updates.

use thiserror::Error;

use crate::models::user::User;
use crate::services::validation::{LoginInput, ProfileInput, ValidationError};

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username or password missing after trimming.
    #[error("Invalid input")]
    InvalidInput,

    /// Unknown username or wrong password. Deliberately indistinguishable.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(format!("{err:#}"))
    }
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Verifies credentials and returns the user they belong to.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidInput`] if either field is blank, and
    /// [`AuthError::InvalidCredentials`] for an unknown user or wrong password.
    async fn login(&self, input: &LoginInput) -> Result<User, AuthError>;

    /// Looks up the user behind a session, if it still exists.
    async fn display_user(&self, user_id: i32) -> Result<Option<User>, AuthError>;

    /// Validates and stores a new display name for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] without writing if the name is invalid.
    async fn update_profile(&self, user_id: i32, input: &ProfileInput)
    -> Result<User, AuthError>;
}
