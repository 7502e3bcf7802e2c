use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(column_type = "String(StringLen::N(20))")]
    pub name: String,

    #[sea_orm(unique, column_type = "String(StringLen::N(20))")]
    pub username: String,

    /// Argon2id PHC string; `None` until a password is first set.
    #[sea_orm(column_type = "String(StringLen::N(128))", nullable)]
    pub password_hash: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
