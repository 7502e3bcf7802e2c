use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::services::{AuthService, MovieService, SeaOrmAuthService, SeaOrmMovieService};

/// Long-lived handles built once at startup and passed to every handler.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub movie_service: Arc<dyn MovieService>,

    pub auth_service: Arc<dyn AuthService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Ok(Self::with_store(config, store))
    }

    #[must_use]
    pub fn with_store(config: Config, store: Store) -> Self {
        let movie_service: Arc<dyn MovieService> =
            Arc::new(SeaOrmMovieService::new(store.clone()));
        let auth_service: Arc<dyn AuthService> = Arc::new(SeaOrmAuthService::new(
            store.clone(),
            config.security.clone(),
        ));

        Self {
            config: Arc::new(config),
            store,
            movie_service,
            auth_service,
        }
    }
}
