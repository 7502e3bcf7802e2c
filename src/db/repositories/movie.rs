use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set};
use tracing::info;

use crate::entities::{movie, prelude::*};
use crate::models::movie::Movie as MovieRow;

/// Repository for movie entries
pub struct MovieRepository {
    conn: DatabaseConnection,
}

impl MovieRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// All movies in insertion order.
    pub async fn list(&self) -> Result<Vec<MovieRow>> {
        let rows = Movie::find()
            .order_by_asc(movie::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list movies")?;

        Ok(rows.into_iter().map(MovieRow::from).collect())
    }

    pub async fn get(&self, id: i32) -> Result<Option<MovieRow>> {
        let row = Movie::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query movie by ID")?;

        Ok(row.map(MovieRow::from))
    }

    pub async fn create(&self, title: &str, year: &str) -> Result<MovieRow> {
        let active_model = movie::ActiveModel {
            title: Set(title.to_string()),
            year: Set(year.to_string()),
            ..Default::default()
        };

        let model = active_model
            .insert(&self.conn)
            .await
            .context("Failed to insert movie")?;

        info!("Created movie {}: {} ({})", model.id, model.title, model.year);
        Ok(model.into())
    }

    /// Returns `None` when the row does not exist, including when it was
    /// deleted between the lookup and the write.
    pub async fn update(&self, id: i32, title: &str, year: &str) -> Result<Option<MovieRow>> {
        let Some(existing) = Movie::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query movie for update")?
        else {
            return Ok(None);
        };

        let mut active: movie::ActiveModel = existing.into();
        active.title = Set(title.to_string());
        active.year = Set(year.to_string());

        match active.update(&self.conn).await {
            Ok(model) => {
                info!("Updated movie {}: {} ({})", model.id, model.title, model.year);
                Ok(Some(model.into()))
            }
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(e).context("Failed to update movie"),
        }
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Movie::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete movie")?;

        if result.rows_affected > 0 {
            info!("Deleted movie {}", id);
        }
        Ok(result.rows_affected > 0)
    }

    /// Inserts many rows in one statement. Used by the demo seeder.
    pub async fn insert_many(&self, movies: &[(&str, &str)]) -> Result<()> {
        if movies.is_empty() {
            return Ok(());
        }

        let models = movies.iter().map(|(title, year)| movie::ActiveModel {
            title: Set((*title).to_string()),
            year: Set((*year).to_string()),
            ..Default::default()
        });

        Movie::insert_many(models)
            .exec(&self.conn)
            .await
            .context("Failed to seed movies")?;
        Ok(())
    }
}
