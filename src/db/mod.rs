use crate::models::movie::Movie;
use crate::models::user::{User, UserUpdate};
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use sea_orm_migration::MigratorTrait;
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

/// Handle to the durable store. Cheap to clone; clones share the pool.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite://").trim_start_matches("sqlite:");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    /// Drops both tables and recreates them empty.
    pub async fn reset_schema(&self) -> Result<()> {
        migrator::Migrator::reset(&self.conn).await?;
        migrator::Migrator::up(&self.conn, None).await?;
        info!("Database schema reset");
        Ok(())
    }

    fn movie_repo(&self) -> repositories::movie::MovieRepository {
        repositories::movie::MovieRepository::new(self.conn.clone())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    // ========================================================================
    // Movies
    // ========================================================================

    pub async fn list_movies(&self) -> Result<Vec<Movie>> {
        self.movie_repo().list().await
    }

    pub async fn get_movie(&self, id: i32) -> Result<Option<Movie>> {
        self.movie_repo().get(id).await
    }

    pub async fn create_movie(&self, title: &str, year: &str) -> Result<Movie> {
        self.movie_repo().create(title, year).await
    }

    pub async fn update_movie(&self, id: i32, title: &str, year: &str) -> Result<Option<Movie>> {
        self.movie_repo().update(id, title, year).await
    }

    pub async fn delete_movie(&self, id: i32) -> Result<bool> {
        self.movie_repo().delete(id).await
    }

    pub async fn seed_movies(&self, movies: &[(&str, &str)]) -> Result<()> {
        self.movie_repo().insert_many(movies).await
    }

    // ========================================================================
    // Users
    // ========================================================================

    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.user_repo().get_by_username(username).await
    }

    pub async fn find_user_with_password(
        &self,
        username: &str,
    ) -> Result<Option<(User, Option<String>)>> {
        self.user_repo()
            .get_by_username_with_password(username)
            .await
    }

    pub async fn get_user(&self, id: i32) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn get_any_user(&self) -> Result<Option<User>> {
        self.user_repo().first().await
    }

    pub async fn create_user(
        &self,
        name: &str,
        username: &str,
        password_hash: Option<String>,
    ) -> Result<User> {
        self.user_repo().create(name, username, password_hash).await
    }

    pub async fn update_user(&self, id: i32, update: UserUpdate) -> Result<Option<User>> {
        self.user_repo().update(id, update).await
    }
}
