use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use std::fmt;

use super::views;
use crate::services::{AuthError, MovieError};

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    DatabaseError(String),

    ValidationError(String),

    InternalError(String),

    Unauthorized(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            ApiError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::NotFound(msg) => {
                tracing::debug!("Not found: {}", msg);
                not_found_response()
            }
            ApiError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                server_error_response()
            }
            ApiError::ValidationError(msg) => (
                StatusCode::BAD_REQUEST,
                Html(views::error_page("400", "Bad request", msg)),
            )
                .into_response(),
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                server_error_response()
            }
            ApiError::Unauthorized(msg) => {
                tracing::debug!("Unauthorized: {}", msg);
                Redirect::to("/login").into_response()
            }
        }
    }
}

fn not_found_response() -> Response {
    (
        StatusCode::NOT_FOUND,
        Html(views::error_page(
            "404",
            "Page Not Found",
            "The page you are looking for does not exist.",
        )),
    )
        .into_response()
}

fn server_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(views::error_page(
            "500",
            "Internal Server Error",
            "Something went wrong. Please try again later.",
        )),
    )
        .into_response()
}

/// Fallback for unmatched routes.
pub async fn not_found_page() -> Response {
    not_found_response()
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::InternalError(format!("{err:#}"))
    }
}

impl From<MovieError> for ApiError {
    fn from(err: MovieError) -> Self {
        match err {
            MovieError::NotFound(id) => ApiError::not_found("Movie", id),
            MovieError::Validation(e) => ApiError::validation(e.to_string()),
            MovieError::Database(msg) => ApiError::DatabaseError(msg),
            MovieError::Internal(msg) => ApiError::InternalError(msg),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidInput | AuthError::InvalidCredentials | AuthError::UserNotFound => {
                ApiError::Unauthorized(err.to_string())
            }
            AuthError::Validation(e) => ApiError::validation(e.to_string()),
            AuthError::Database(msg) => ApiError::DatabaseError(msg),
            AuthError::Internal(msg) => ApiError::InternalError(msg),
        }
    }
}

impl ApiError {
    pub fn not_found(resource: &str, id: impl fmt::Display) -> Self {
        ApiError::NotFound(format!("{} {} not found", resource, id))
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::ValidationError(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        ApiError::Unauthorized(msg.into())
    }

    pub fn session(err: tower_sessions::session::Error) -> Self {
        ApiError::InternalError(format!("Session error: {err}"))
    }
}
