//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use crate::domain::{Password, Profile, User};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub username: String,
    pub email: String,
    pub mobile: String,
    pub password_digest: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for User {
    fn from(model: Model) -> Self {
        User::from_storage(
            model.id,
            Profile {
                name: model.name,
                username: model.username,
                email: model.email,
                mobile: model.mobile,
            },
            Password::from_hash(model.password_digest),
            model.created_at,
            model.updated_at,
        )
    }
}

/// Convert domain entity to a fully-set active model
impl From<&User> for ActiveModel {
    fn from(user: &User) -> Self {
        ActiveModel {
            id: Set(user.id),
            name: Set(user.profile.name.clone()),
            username: Set(user.profile.username.clone()),
            email: Set(user.profile.email.clone()),
            mobile: Set(user.profile.mobile.clone()),
            password_digest: Set(user.password_digest().as_str().to_string()),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
    }
}
