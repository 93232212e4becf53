//! Domain layer - Core business entities and logic
//!
//! The user entity, its password digest and the validation error map.
//! Nothing here touches the database or HTTP.

pub mod password;
pub mod user;
pub mod validation;

pub use password::{Password, PasswordError};
pub use user::{NewUser, Profile, User, UserChanges, UserResponse};
pub use validation::FieldErrors;
