use serde::Serialize;

use crate::entities::user;

/// User data returned from the store (without the password hash).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub username: String,
    pub has_password: bool,
}

impl From<user::Model> for User {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            username: model.username,
            has_password: model.password_hash.is_some(),
        }
    }
}

/// Partial update applied by [`crate::db::Store::update_user`].
/// `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub username: Option<String>,
    pub password_hash: Option<String>,
}

impl UserUpdate {
    #[must_use]
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.username.is_none() && self.password_hash.is_none()
    }
}
