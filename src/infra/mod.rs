//! Infrastructure layer - External systems integration
//!
//! Database connection, schema migrations and repositories.

pub mod db;
pub mod repositories;

pub use db::{Database, MigrationState, Migrator};
pub use repositories::{UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::MockUserRepository;
