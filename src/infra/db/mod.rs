//! PostgreSQL connection pool and schema management.

use sea_orm::{Database as SeaDatabase, DatabaseConnection, DbErr};
use sea_orm_migration::{MigrationStatus, MigratorTrait};

use crate::config::Config;

pub mod migrations;

pub use migrations::Migrator;

/// Pooled connection to the users database.
///
/// Clones share the same pool.
#[derive(Clone)]
pub struct Database {
    pool: DatabaseConnection,
}

/// Whether one migration has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationState {
    pub name: String,
    pub applied: bool,
}

impl Database {
    /// Open the pool and bring the schema up to date.
    pub async fn connect(config: &Config) -> Result<Self, DbErr> {
        let database = Self::open(config).await?;
        database.migrate_up().await.inspect_err(|e| {
            tracing::error!("Failed to run migrations: {}", e);
        })?;

        tracing::info!("Database connected and migrations applied");
        Ok(database)
    }

    /// Open the pool and leave the schema untouched.
    pub async fn open(config: &Config) -> Result<Self, DbErr> {
        tracing::debug!(environment = %config.environment, "Opening database pool");
        let pool = SeaDatabase::connect(&config.database_url).await?;
        Ok(Self { pool })
    }

    /// Handle for repositories.
    pub fn pool(&self) -> DatabaseConnection {
        self.pool.clone()
    }

    /// Apply every pending migration.
    pub async fn migrate_up(&self) -> Result<(), DbErr> {
        Migrator::up(&self.pool, None).await
    }

    /// Revert the most recent migration.
    pub async fn migrate_down(&self) -> Result<(), DbErr> {
        Migrator::down(&self.pool, Some(1)).await
    }

    /// Drop all tables and re-apply every migration.
    pub async fn reset(&self) -> Result<(), DbErr> {
        Migrator::fresh(&self.pool).await
    }

    /// Known migrations in order, with their applied state.
    pub async fn migrations(&self) -> Result<Vec<MigrationState>, DbErr> {
        let migrations = Migrator::get_migration_with_status(&self.pool).await?;

        Ok(migrations
            .iter()
            .map(|m| MigrationState {
                name: m.name().to_string(),
                applied: matches!(m.status(), MigrationStatus::Applied),
            })
            .collect())
    }

    /// Round-trip to the server.
    pub async fn ping(&self) -> Result<(), DbErr> {
        self.pool.ping().await
    }
}
