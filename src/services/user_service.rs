//! User service - validation and persistence lifecycle of users.
//!
//! Validation collects every violation before reporting: required fields and
//! password problems come from the domain, uniqueness from the repository.
//! Uniqueness is query-then-write without a transaction, so two concurrent
//! signups with the same username can both succeed.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::MSG_TAKEN;
use crate::domain::{FieldErrors, NewUser, Password, Profile, User, UserChanges};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UserRepository;
use crate::types::{Page, PaginationParams};

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// One page of users, newest first, with the total count
    async fn list_users(&self, params: &PaginationParams) -> AppResult<Page<User>>;

    /// Get user by ID
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    /// Validate and insert a new user
    async fn create_user(&self, input: NewUser) -> AppResult<User>;

    /// Merge supplied fields into an existing user, re-validate and save
    async fn update_user(&self, id: Uuid, changes: UserChanges) -> AppResult<User>;

    /// Permanently delete a user
    async fn delete_user(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of UserService over a repository.
pub struct UserManager {
    users: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Derive a digest from the pair, or record why it cannot be derived.
    fn digest_password(
        password: &str,
        confirmation: &str,
        errors: &mut FieldErrors,
    ) -> AppResult<Option<Password>> {
        match Password::confirm(password, confirmation) {
            Ok(()) => Password::new(password).map(Some),
            Err(e) => {
                errors.add(e.field(), e.to_string());
                Ok(None)
            }
        }
    }

    /// Required fields plus uniqueness against every other user.
    async fn validate(&self, id: Uuid, profile: &Profile, errors: &mut FieldErrors) -> AppResult<()> {
        profile.check_required(errors);

        if !profile.username.is_empty() && self.users.username_taken(&profile.username, id).await? {
            errors.add("username", MSG_TAKEN);
        }
        if !profile.email.is_empty() && self.users.email_taken(&profile.email, id).await? {
            errors.add("email", MSG_TAKEN);
        }

        Ok(())
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn list_users(&self, params: &PaginationParams) -> AppResult<Page<User>> {
        self.users.list(params).await
    }

    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.users.find_by_id(id).await?.ok_or_not_found()
    }

    async fn create_user(&self, input: NewUser) -> AppResult<User> {
        let id = Uuid::new_v4();
        let (profile, password, confirmation) = input.into_parts();

        let mut errors = FieldErrors::new();
        let digest = Self::digest_password(&password, &confirmation, &mut errors)?;
        self.validate(id, &profile, &mut errors).await?;

        let digest = match digest {
            Some(digest) if errors.is_empty() => digest,
            _ => {
                tracing::debug!(fields = ?errors.fields().collect::<Vec<_>>(), "User invalid");
                return Err(AppError::invalid(errors));
            }
        };

        let user = self.users.insert(User::new(id, profile, digest)).await?;
        tracing::info!(user_id = %user.id, "User created");
        Ok(user)
    }

    async fn update_user(&self, id: Uuid, changes: UserChanges) -> AppResult<User> {
        let mut user = self.get_user(id).await?;
        user.profile.apply(&changes);

        let mut errors = FieldErrors::new();
        if changes.touches_password() {
            let password = changes.password.as_deref().unwrap_or_default();
            let confirmation = changes.password_confirmation.as_deref().unwrap_or_default();
            if let Some(digest) = Self::digest_password(password, confirmation, &mut errors)? {
                user.replace_password(digest);
            }
        }
        self.validate(user.id, &user.profile, &mut errors).await?;

        if !errors.is_empty() {
            tracing::debug!(user_id = %id, fields = ?errors.fields().collect::<Vec<_>>(), "User invalid");
            return Err(AppError::invalid(errors));
        }

        user.touch();
        let user = self.users.update(user).await?;
        tracing::info!(user_id = %user.id, "User updated");
        Ok(user)
    }

    async fn delete_user(&self, id: Uuid) -> AppResult<()> {
        if !self.users.delete(id).await? {
            return Err(AppError::NotFound);
        }
        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::MockUserRepository;
    use mockall::predicate::{always, eq};

    fn new_user() -> NewUser {
        NewUser {
            name: "Test User".to_string(),
            username: "test_user".to_string(),
            email: "test@sample.com".to_string(),
            mobile: "9876543210".to_string(),
            password: "test123#".to_string(),
            password_confirmation: "test123#".to_string(),
        }
    }

    fn stored_user(id: Uuid) -> User {
        let (profile, password, _) = new_user().into_parts();
        User::new(id, profile, Password::new(&password).unwrap())
    }

    fn nothing_taken(repo: &mut MockUserRepository) {
        repo.expect_username_taken().returning(|_, _| Ok(false));
        repo.expect_email_taken().returning(|_, _| Ok(false));
    }

    fn service(repo: MockUserRepository) -> UserManager {
        UserManager::new(Arc::new(repo))
    }

    fn field_errors(result: AppResult<User>) -> FieldErrors {
        match result {
            Err(AppError::Unprocessable {
                errors: Some(errors),
                ..
            }) => errors,
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_user_success() {
        let mut repo = MockUserRepository::new();
        nothing_taken(&mut repo);
        repo.expect_insert().times(1).returning(Ok);

        let user = service(repo).create_user(new_user()).await.unwrap();

        assert_eq!(user.profile.username, "test_user");
        assert_eq!(user.created_at, user.updated_at);
        assert!(user.password_digest().verify("test123#"));
    }

    #[tokio::test]
    async fn test_create_user_blank_fields() {
        let mut repo = MockUserRepository::new();
        // Uniqueness is not queried for blank values
        repo.expect_username_taken().never();
        repo.expect_email_taken().never();
        repo.expect_insert().never();

        let input = NewUser {
            name: String::new(),
            username: String::new(),
            email: String::new(),
            ..new_user()
        };
        let errors = field_errors(service(repo).create_user(input).await);

        assert_eq!(errors.get("name"), ["can't be blank"]);
        assert_eq!(errors.get("username"), ["can't be blank"]);
        assert_eq!(errors.get("email"), ["can't be blank"]);
    }

    #[tokio::test]
    async fn test_create_user_duplicate_username_and_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_username_taken()
            .with(eq("test_user"), always())
            .returning(|_, _| Ok(true));
        repo.expect_email_taken()
            .with(eq("test@sample.com"), always())
            .returning(|_, _| Ok(true));
        repo.expect_insert().never();

        let errors = field_errors(service(repo).create_user(new_user()).await);

        assert_eq!(errors.get("username"), ["is already taken"]);
        assert_eq!(errors.get("email"), ["is already taken"]);
    }

    #[tokio::test]
    async fn test_create_user_password_mismatch() {
        let mut repo = MockUserRepository::new();
        nothing_taken(&mut repo);
        repo.expect_insert().never();

        let input = NewUser {
            password_confirmation: "different".to_string(),
            ..new_user()
        };
        let errors = field_errors(service(repo).create_user(input).await);

        assert_eq!(
            errors.get("password_confirmation"),
            ["Password and Password Confirmation do not match"]
        );
        assert!(errors.get("password").is_empty());
    }

    #[tokio::test]
    async fn test_create_user_collects_password_and_field_errors() {
        let mut repo = MockUserRepository::new();
        nothing_taken(&mut repo);
        repo.expect_insert().never();

        let input = NewUser {
            name: String::new(),
            password: String::new(),
            password_confirmation: String::new(),
            ..new_user()
        };
        let errors = field_errors(service(repo).create_user(input).await);

        assert_eq!(errors.get("password"), ["Invalid Password"]);
        assert_eq!(errors.get("name"), ["can't be blank"]);
    }

    #[tokio::test]
    async fn test_update_user_merges_supplied_fields() {
        let id = Uuid::new_v4();
        let original = stored_user(id);
        let original_digest = original.password_digest().clone();

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(original.clone())));
        repo.expect_username_taken()
            .with(always(), eq(id))
            .returning(|_, _| Ok(false));
        repo.expect_email_taken()
            .with(always(), eq(id))
            .returning(|_, _| Ok(false));
        repo.expect_update().times(1).returning(Ok);

        let changes = UserChanges {
            name: Some("Renamed".to_string()),
            ..Default::default()
        };
        let user = service(repo).update_user(id, changes).await.unwrap();

        assert_eq!(user.profile.name, "Renamed");
        assert_eq!(user.profile.username, "test_user");
        assert_eq!(user.profile.email, "test@sample.com");
        assert_eq!(user.profile.mobile, "9876543210");
        assert_eq!(user.password_digest(), &original_digest);
        assert!(user.updated_at >= user.created_at);
    }

    #[tokio::test]
    async fn test_update_user_regenerates_password() {
        let id = Uuid::new_v4();
        let original = stored_user(id);

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(original.clone())));
        nothing_taken(&mut repo);
        repo.expect_update().returning(Ok);

        let changes = UserChanges {
            password: Some("testing123".to_string()),
            password_confirmation: Some("testing123".to_string()),
            ..Default::default()
        };
        let user = service(repo).update_user(id, changes).await.unwrap();

        assert!(user.password_digest().verify("testing123"));
        assert!(!user.password_digest().verify("test123#"));
    }

    #[tokio::test]
    async fn test_update_user_half_password_pair_is_blank() {
        let id = Uuid::new_v4();
        let original = stored_user(id);

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(original.clone())));
        nothing_taken(&mut repo);
        repo.expect_update().never();

        let changes = UserChanges {
            password_confirmation: Some("testing123".to_string()),
            ..Default::default()
        };
        let errors = field_errors(service(repo).update_user(id, changes).await);

        assert_eq!(errors.get("password"), ["Invalid Password"]);
    }

    #[tokio::test]
    async fn test_update_user_rejects_taken_email() {
        let id = Uuid::new_v4();
        let original = stored_user(id);

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(original.clone())));
        repo.expect_username_taken().returning(|_, _| Ok(false));
        repo.expect_email_taken()
            .with(eq("other@sample.com"), eq(id))
            .returning(|_, _| Ok(true));
        repo.expect_update().never();

        let changes = UserChanges {
            email: Some("other@sample.com".to_string()),
            ..Default::default()
        };
        let errors = field_errors(service(repo).update_user(id, changes).await);

        assert_eq!(errors.get("email"), ["is already taken"]);
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let result = service(repo)
            .update_user(Uuid::new_v4(), UserChanges::default())
            .await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let result = service(repo).get_user(Uuid::new_v4()).await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_user() {
        let id = Uuid::new_v4();
        let mut repo = MockUserRepository::new();
        repo.expect_delete().with(eq(id)).returning(|_| Ok(true));

        assert!(service(repo).delete_user(id).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_missing_user() {
        let mut repo = MockUserRepository::new();
        repo.expect_delete().returning(|_| Ok(false));

        let result = service(repo).delete_user(Uuid::new_v4()).await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_list_users_passes_through_page() {
        let mut repo = MockUserRepository::new();
        repo.expect_list()
            .withf(|params| params.offset() == 20)
            .returning(|_| Ok(Page::new(vec![stored_user(Uuid::new_v4())], 21)));

        let page = service(repo)
            .list_users(&PaginationParams::for_page(2))
            .await
            .unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total, 21);
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let mut repo = MockUserRepository::new();
        repo.expect_username_taken()
            .returning(|_, _| Err(AppError::from(sea_orm::DbErr::Custom("down".into()))));
        repo.expect_email_taken().returning(|_, _| Ok(false));

        let result = service(repo).create_user(new_user()).await;

        assert!(matches!(result, Err(AppError::Database(_))));
    }
}
