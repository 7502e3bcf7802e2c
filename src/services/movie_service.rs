//! Domain service for the shared movie list.
//!
//! Every mutation validates its input first and leaves the store untouched
//! when validation fails.

use thiserror::Error;

use crate::models::movie::Movie;
use crate::services::validation::{MovieInput, ValidationError};

/// Errors specific to movie operations.
#[derive(Debug, Error)]
pub enum MovieError {
    #[error("Movie not found: {0}")]
    NotFound(i32),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for MovieError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for MovieError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(format!("{err:#}"))
    }
}

/// Domain service trait for movie entries.
#[async_trait::async_trait]
pub trait MovieService: Send + Sync {
    /// Lists every movie in a stable order.
    async fn list(&self) -> Result<Vec<Movie>, MovieError>;

    /// # Errors
    ///
    /// Returns [`MovieError::NotFound`] if no movie has this id.
    async fn get(&self, id: i32) -> Result<Movie, MovieError>;

    /// Validates and inserts a new movie.
    ///
    /// # Errors
    ///
    /// Returns [`MovieError::Validation`] without writing if the input is invalid.
    async fn create(&self, input: &MovieInput) -> Result<Movie, MovieError>;

    /// Validates and overwrites title and year. Last write wins.
    ///
    /// # Errors
    ///
    /// Returns [`MovieError::Validation`] without writing if the input is invalid,
    /// or [`MovieError::NotFound`] if the movie is gone.
    async fn update(&self, id: i32, input: &MovieInput) -> Result<Movie, MovieError>;

    /// # Errors
    ///
    /// Returns [`MovieError::NotFound`] if no movie has this id.
    async fn delete(&self, id: i32) -> Result<(), MovieError>;
}
