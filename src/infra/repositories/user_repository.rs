//! User repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::User;
use crate::errors::{AppError, AppResult};
use crate::types::{Page, PaginationParams};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Uniqueness lookups take the ID of the record being validated so that a
/// user never conflicts with itself.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Whether another user already has this username
    async fn username_taken(&self, username: &str, except: Uuid) -> AppResult<bool>;

    /// Whether another user already has this email
    async fn email_taken(&self, email: &str, except: Uuid) -> AppResult<bool>;

    /// Insert a new user
    async fn insert(&self, user: User) -> AppResult<User>;

    /// Overwrite an existing user
    async fn update(&self, user: User) -> AppResult<User>;

    /// Permanently delete user; `false` when no record matched
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// One page of users, newest first, with the total user count
    async fn list(&self, params: &PaginationParams) -> AppResult<Page<User>>;
}

/// SeaORM-backed implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn taken(&self, column: user::Column, value: &str, except: Uuid) -> AppResult<bool> {
        let count = UserEntity::find()
            .filter(column.eq(value))
            .filter(user::Column::Id.ne(except))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn username_taken(&self, username: &str, except: Uuid) -> AppResult<bool> {
        self.taken(user::Column::Username, username, except).await
    }

    async fn email_taken(&self, email: &str, except: Uuid) -> AppResult<bool> {
        self.taken(user::Column::Email, email, except).await
    }

    async fn insert(&self, user: User) -> AppResult<User> {
        let model = ActiveModel::from(&user)
            .insert(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(User::from(model))
    }

    async fn update(&self, user: User) -> AppResult<User> {
        let model = ActiveModel::from(&user)
            .update(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(User::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected > 0)
    }

    async fn list(&self, params: &PaginationParams) -> AppResult<Page<User>> {
        let paginator = UserEntity::find()
            .order_by_desc(user::Column::CreatedAt)
            .order_by_asc(user::Column::Id)
            .paginate(&self.db, params.limit());
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page() - 1).await?;

        Ok(Page::new(models.into_iter().map(User::from).collect(), total))
    }
}
