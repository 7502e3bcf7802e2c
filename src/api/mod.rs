use axum::{
    Router, middleware,
    routing::{get, post},
};
use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use tower_sessions::cookie::{Key, SameSite};
use tower_sessions::{ExpiredDeletion, Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use crate::config::{Config, ServerConfig};
use crate::db::Store;
use crate::state::SharedState;

mod assets;
pub mod auth;
mod error;
pub mod flash;
mod movies;
mod validation;
pub mod views;

pub use error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    session_key: Key,

    session_store: SqliteStore,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn movies(&self) -> &Arc<dyn crate::services::MovieService> {
        &self.shared.movie_service
    }

    #[must_use]
    pub fn auth(&self) -> &Arc<dyn crate::services::AuthService> {
        &self.shared.auth_service
    }

    #[must_use]
    pub const fn session_store(&self) -> &SqliteStore {
        &self.session_store
    }
}

fn session_key(server: &ServerConfig) -> anyhow::Result<Key> {
    match &server.session_secret {
        Some(secret) => Key::try_from(secret.as_bytes())
            .map_err(|e| anyhow::anyhow!("Invalid session secret: {e}")),
        None => {
            tracing::warn!("No session secret configured; sessions will not survive a restart");
            Ok(Key::generate())
        }
    }
}

const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Session rows live next to the app tables. Expired ones are swept in
/// the background for as long as the runtime is up.
async fn session_store(store: &Store) -> anyhow::Result<SqliteStore> {
    let session_store = SqliteStore::new(store.conn.get_sqlite_connection_pool().clone());
    session_store
        .migrate()
        .await
        .context("Failed to create session table")?;

    let sweeper = session_store.clone();
    tokio::spawn(async move {
        if let Err(e) = sweeper
            .continuously_delete_expired(SESSION_SWEEP_INTERVAL)
            .await
        {
            tracing::error!("Expired session cleanup stopped: {e}");
        }
    });

    Ok(session_store)
}

pub async fn create_app_state(shared: Arc<SharedState>) -> anyhow::Result<Arc<AppState>> {
    let session_key = session_key(&shared.config.server)?;
    let session_store = session_store(&shared.store).await?;
    Ok(Arc::new(AppState {
        shared,
        session_key,
        session_store,
    }))
}

pub async fn create_app_state_from_config(config: Config) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    create_app_state(shared).await
}

pub fn router(state: Arc<AppState>) -> Router {
    let server = &state.config().server;

    let session_layer = SessionManagerLayer::new(state.session_store.clone())
        .with_secure(server.secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            server.session_inactivity_minutes,
        )))
        .with_signed(state.session_key.clone());

    Router::new()
        .merge(create_protected_router())
        .route("/", get(movies::index).post(movies::create))
        .route("/login", get(auth::login_form).post(auth::login))
        .route("/static/{*path}", get(assets::serve_asset))
        .fallback(error::not_found_page)
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn create_protected_router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/movie/edit/{id}",
            get(movies::edit_form).post(movies::edit),
        )
        .route("/movie/delete/{id}", post(movies::delete))
        .route("/logout", get(auth::logout))
        .route("/settings", get(auth::settings_form).post(auth::settings))
        .route_layer(middleware::from_fn(auth::require_auth))
}
