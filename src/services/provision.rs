//! Administrative provisioning: schema setup, demo data, and the admin user.

use anyhow::{Context, Result};
use tracing::info;

use crate::config::SecurityConfig;
use crate::db::Store;
use crate::models::user::{User, UserUpdate};
use crate::services::credentials::hash_password_blocking;
use crate::services::validation::{FieldRule, MAX_NAME_CHARS, PASSWORD};

pub const DEMO_USERNAME: &str = "soraoo";
pub const DEMO_PASSWORD: &str = "123456";

pub const DEMO_MOVIES: &[(&str, &str)] = &[
    ("My Neighbor Totoro", "1988"),
    ("Dead Poets Society", "1989"),
    ("A Perfect World", "1993"),
    ("Leon", "1994"),
    ("Mahjong", "1996"),
    ("Swallowtail Butterfly", "1996"),
    ("King of Comedy", "1999"),
    ("Devils on the Doorstep", "1999"),
    ("WALL-E", "2008"),
    ("The Pork of Music", "2012"),
];

const DEFAULT_ADMIN_NAME: &str = "Admin";

const USERNAME: FieldRule = FieldRule::new("username")
    .trimmed()
    .required()
    .max_chars(MAX_NAME_CHARS);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminOutcome {
    Created,
    Updated,
}

/// Creates the tables, dropping them first when `drop` is set.
pub async fn init_db(store: &Store, drop: bool) -> Result<()> {
    if drop {
        store.reset_schema().await?;
    }
    // Migrations already ran when the store was opened.
    store.ping().await
}

/// Resets the schema and loads the demo user and movies.
pub async fn forge(store: &Store, security: &SecurityConfig) -> Result<User> {
    store.reset_schema().await?;

    let hash = hash_password_blocking(DEMO_PASSWORD, security).await?;
    let user = store
        .create_user(DEMO_USERNAME, DEMO_USERNAME, Some(hash))
        .await?;

    store.seed_movies(DEMO_MOVIES).await?;

    info!(
        "Seeded demo user '{}' and {} movies",
        user.username,
        DEMO_MOVIES.len()
    );
    Ok(user)
}

/// Points the existing admin at new credentials, or creates one.
pub async fn provision_admin(
    store: &Store,
    security: &SecurityConfig,
    username: &str,
    password: &str,
) -> Result<(User, AdminOutcome)> {
    let username = USERNAME
        .apply(username)
        .context("Invalid admin username")?;
    let password = PASSWORD
        .apply(password)
        .context("Invalid admin password")?;

    let hash = hash_password_blocking(&password, security).await?;

    if let Some(existing) = store.get_any_user().await? {
        let update = UserUpdate {
            username: Some(username),
            password_hash: Some(hash),
            ..UserUpdate::default()
        };
        let user = store
            .update_user(existing.id, update)
            .await?
            .context("Admin user disappeared during update")?;

        info!("Updated admin user '{}'", user.username);
        return Ok((user, AdminOutcome::Updated));
    }

    let user = store
        .create_user(DEFAULT_ADMIN_NAME, &username, Some(hash))
        .await?;
    info!("Created admin user '{}'", user.username);
    Ok((user, AdminOutcome::Created))
}
