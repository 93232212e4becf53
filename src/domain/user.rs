//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::{FieldErrors, Password};

/// User-editable attributes.
///
/// Name, username and email are required; uniqueness of username and email
/// needs the store and is checked by the service layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct Profile {
    #[validate(length(min = 1, message = "can't be blank"))]
    pub name: String,
    #[validate(length(min = 1, message = "can't be blank"))]
    pub username: String,
    #[validate(length(min = 1, message = "can't be blank"))]
    pub email: String,
    pub mobile: String,
}

impl Profile {
    /// Collect required-field violations into `errors`.
    pub fn check_required(&self, errors: &mut FieldErrors) {
        if let Err(e) = self.validate() {
            errors.extend_from(&e);
        }
    }

    /// Overwrite only the attributes present in `changes`.
    pub fn apply(&mut self, changes: &UserChanges) {
        if let Some(name) = &changes.name {
            self.name = name.clone();
        }
        if let Some(username) = &changes.username {
            self.username = username.clone();
        }
        if let Some(email) = &changes.email {
            self.email = email.clone();
        }
        if let Some(mobile) = &changes.mobile {
            self.mobile = mobile.clone();
        }
    }
}

/// User domain entity
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub profile: Profile,
    password_digest: Password,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user stamped with the current time.
    pub fn new(id: Uuid, profile: Profile, password_digest: Password) -> Self {
        let now = Utc::now();
        Self {
            id,
            profile,
            password_digest,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild a user from a stored record.
    pub fn from_storage(
        id: Uuid,
        profile: Profile,
        password_digest: Password,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            profile,
            password_digest,
            created_at,
            updated_at,
        }
    }

    pub fn password_digest(&self) -> &Password {
        &self.password_digest
    }

    /// Swap in a freshly derived digest.
    pub fn replace_password(&mut self, password_digest: Password) {
        self.password_digest = password_digest;
    }

    /// Bump the modification timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// User creation payload
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct NewUser {
    /// Display name (required)
    #[schema(example = "Aditya Shedge")]
    pub name: String,
    /// Unique handle (required)
    #[schema(example = "aditya")]
    pub username: String,
    /// Unique email address (required)
    #[schema(example = "test@sample.com")]
    pub email: String,
    /// Mobile number
    #[schema(example = "9876543210")]
    pub mobile: String,
    /// Plain-text password (required)
    #[schema(example = "test123#")]
    pub password: String,
    /// Must equal `password`
    #[schema(example = "test123#")]
    pub password_confirmation: String,
}

impl NewUser {
    /// Split into the stored attributes and the password pair.
    pub fn into_parts(self) -> (Profile, String, String) {
        let profile = Profile {
            name: self.name,
            username: self.username,
            email: self.email,
            mobile: self.mobile,
        };
        (profile, self.password, self.password_confirmation)
    }
}

/// Partial update payload; absent members are left untouched.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct UserChanges {
    #[schema(example = "Test")]
    pub name: Option<String>,
    #[schema(example = "test")]
    pub username: Option<String>,
    #[schema(example = "test@test.com")]
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
}

impl UserChanges {
    /// True when either half of the password pair was supplied.
    pub fn touches_password(&self) -> bool {
        self.password.is_some() || self.password_confirmation.is_some()
    }
}

/// User representation returned to clients (no digest).
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    #[schema(example = "Aditya Shedge")]
    pub name: String,
    #[schema(example = "aditya")]
    pub username: String,
    #[schema(example = "test@sample.com")]
    pub email: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    #[schema(example = "9876543210")]
    pub mobile: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.profile.name,
            username: user.profile.username,
            email: user.profile.email,
            mobile: user.profile.mobile,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
