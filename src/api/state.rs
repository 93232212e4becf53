//! Application state - Dependency injection container.
//!
//! Replaces process-wide globals: everything a handler needs is reachable
//! from this value, which axum clones into each request.

use std::sync::Arc;

use crate::infra::{Database, UserStore};
use crate::services::{UserManager, UserService};

/// Application state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Database handle, used for health checks
    database: Option<Arc<Database>>,
}

impl AppState {
    /// Wire the SeaORM-backed services onto a database connection pool.
    pub fn from_database(database: Arc<Database>) -> Self {
        let users = Arc::new(UserStore::new(database.pool()));
        let user_service = Arc::new(UserManager::new(users));

        Self {
            user_service,
            database: Some(database),
        }
    }

    /// Create state with a manually injected service (no database health check).
    pub fn new(user_service: Arc<dyn UserService>) -> Self {
        Self {
            user_service,
            database: None,
        }
    }

    /// Database handle when the state was built from one.
    pub fn database(&self) -> Option<&Arc<Database>> {
        self.database.as_ref()
    }
}
