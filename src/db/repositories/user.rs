use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::user as users;
use crate::models::user::{User, UserUpdate};

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Get user by username
    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.conn)
            .await
            .context("Failed to query user by username")?;

        Ok(user.map(User::from))
    }

    /// Get user by username together with the stored password hash, for login.
    pub async fn get_by_username_with_password(
        &self,
        username: &str,
    ) -> Result<Option<(User, Option<String>)>> {
        let user = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.conn)
            .await
            .context("Failed to query user by username")?;

        Ok(user.map(|u| {
            let password_hash = u.password_hash.clone();
            (User::from(u), password_hash)
        }))
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i32) -> Result<Option<User>> {
        let user = users::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query user by ID")?;

        Ok(user.map(User::from))
    }

    /// Lowest-id user, if any. Only the provisioning commands use this.
    pub async fn first(&self) -> Result<Option<User>> {
        let user = users::Entity::find()
            .order_by_asc(users::Column::Id)
            .one(&self.conn)
            .await
            .context("Failed to query first user")?;

        Ok(user.map(User::from))
    }

    pub async fn create(
        &self,
        name: &str,
        username: &str,
        password_hash: Option<String>,
    ) -> Result<User> {
        let active = users::ActiveModel {
            name: Set(name.to_string()),
            username: Set(username.to_string()),
            password_hash: Set(password_hash),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .with_context(|| format!("Failed to create user: {username}"))?;

        Ok(model.into())
    }

    /// Applies the set fields of `update`. Returns `None` if the user is gone.
    pub async fn update(&self, id: i32, update: UserUpdate) -> Result<Option<User>> {
        let Some(user) = users::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query user for update")?
        else {
            return Ok(None);
        };

        if update.is_empty() {
            return Ok(Some(user.into()));
        }

        let mut active: users::ActiveModel = user.into();
        if let Some(name) = update.name {
            active.name = Set(name);
        }
        if let Some(username) = update.username {
            active.username = Set(username);
        }
        if let Some(hash) = update.password_hash {
            active.password_hash = Set(Some(hash));
        }

        match active.update(&self.conn).await {
            Ok(model) => Ok(Some(model.into())),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(e).context("Failed to update user"),
        }
    }
}
