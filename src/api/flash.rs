//! One-shot notices carried in the session until the next rendered page.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use super::ApiError;

const FLASH_KEY: &str = "_flash";

pub const INVALID_INPUT: &str = "Invalid input.";
pub const INVALID_CREDENTIALS: &str = "Invalid username or password.";
pub const LOGIN_REQUIRED: &str = "Please log in.";
pub const LOGIN_SUCCESS: &str = "Login success.";
pub const GOODBYE: &str = "Goodbye.";
pub const ITEM_CREATED: &str = "Item created.";
pub const ITEM_UPDATED: &str = "Item updated.";
pub const ITEM_DELETED: &str = "Item deleted.";
pub const SETTINGS_UPDATED: &str = "Settings updated.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Error,
    Info,
}

impl FlashKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

pub async fn push(
    session: &Session,
    kind: FlashKind,
    message: impl Into<String>,
) -> Result<(), ApiError> {
    let mut queue: Vec<Flash> = session
        .get(FLASH_KEY)
        .await
        .map_err(ApiError::session)?
        .unwrap_or_default();

    queue.push(Flash {
        kind,
        message: message.into(),
    });

    session
        .insert(FLASH_KEY, queue)
        .await
        .map_err(ApiError::session)
}

pub async fn success(session: &Session, message: &str) -> Result<(), ApiError> {
    push(session, FlashKind::Success, message).await
}

pub async fn error(session: &Session, message: &str) -> Result<(), ApiError> {
    push(session, FlashKind::Error, message).await
}

pub async fn info(session: &Session, message: &str) -> Result<(), ApiError> {
    push(session, FlashKind::Info, message).await
}

/// Removes and returns every pending notice.
pub async fn take(session: &Session) -> Result<Vec<Flash>, ApiError> {
    Ok(session
        .remove::<Vec<Flash>>(FLASH_KEY)
        .await
        .map_err(ApiError::session)?
        .unwrap_or_default())
}
