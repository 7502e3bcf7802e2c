//! `SeaORM` implementation of the `AuthService` trait.

use crate::config::SecurityConfig;
use crate::db::Store;
use crate::models::user::{User, UserUpdate};
use crate::services::auth_service::{AuthError, AuthService};
use crate::services::credentials::{hash_password_blocking, verify_password_blocking};
use crate::services::validation::{LoginInput, ProfileInput};
use async_trait::async_trait;
use tokio::sync::OnceCell;

const DUMMY_PASSWORD: &str = "watchlist-dummy-password";

pub struct SeaOrmAuthService {
    store: Store,
    security: SecurityConfig,
    /// Verified against when there is no real hash, so unknown usernames
    /// cost the same as wrong passwords.
    dummy_hash: OnceCell<String>,
}

impl SeaOrmAuthService {
    #[must_use]
    pub fn new(store: Store, security: SecurityConfig) -> Self {
        Self {
            store,
            security,
            dummy_hash: OnceCell::new(),
        }
    }

    async fn dummy_hash(&self) -> Result<String, AuthError> {
        let hash = self
            .dummy_hash
            .get_or_try_init(|| hash_password_blocking(DUMMY_PASSWORD, &self.security))
            .await?;
        Ok(hash.clone())
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn login(&self, input: &LoginInput) -> Result<User, AuthError> {
        let (username, password) = input.validate().map_err(|_| AuthError::InvalidInput)?;

        // A user without a password can't log in.
        let (user, password_hash) = match self.store.find_user_with_password(&username).await? {
            Some((user, Some(hash))) => (Some(user), hash),
            _ => (None, self.dummy_hash().await?),
        };

        let verified = verify_password_blocking(&password, &password_hash).await?;

        match user {
            Some(user) if verified => Ok(user),
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    async fn display_user(&self, user_id: i32) -> Result<Option<User>, AuthError> {
        Ok(self.store.get_user(user_id).await?)
    }

    async fn update_profile(
        &self,
        user_id: i32,
        input: &ProfileInput,
    ) -> Result<User, AuthError> {
        let name = input.validate()?;

        self.store
            .update_user(user_id, UserUpdate::name(name))
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}
