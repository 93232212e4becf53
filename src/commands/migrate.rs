//! Migrate command - schema management without starting the server.

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{Database, MigrationState};

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    let db = Database::open(&config).await?;

    match args.action {
        MigrateAction::Up => {
            db.migrate_up().await?;
            tracing::info!("Schema is up to date");
        }
        MigrateAction::Down => {
            db.migrate_down().await?;
            tracing::info!("Reverted the latest migration");
        }
        MigrateAction::Status => {
            for line in status_lines(&db.migrations().await?) {
                println!("{}", line);
            }
        }
        MigrateAction::Fresh => {
            tracing::warn!(environment = %config.environment, "Dropping all tables");
            db.reset().await?;
            tracing::info!("Schema rebuilt from scratch");
        }
    }

    Ok(())
}

/// One `[x] name` / `[ ] name` line per migration.
fn status_lines(migrations: &[MigrationState]) -> Vec<String> {
    if migrations.is_empty() {
        return vec!["No migrations defined".to_string()];
    }
    migrations
        .iter()
        .map(|m| format!("[{}] {}", if m.applied { "x" } else { " " }, m.name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_lines_mark_applied_migrations() {
        let migrations = vec![
            MigrationState {
                name: "m20240101_000001_create_users_table".to_string(),
                applied: true,
            },
            MigrationState {
                name: "m20240201_000001_next".to_string(),
                applied: false,
            },
        ];

        assert_eq!(
            status_lines(&migrations),
            vec![
                "[x] m20240101_000001_create_users_table",
                "[ ] m20240201_000001_next"
            ]
        );
    }

    #[test]
    fn test_status_lines_without_migrations() {
        assert_eq!(status_lines(&[]), vec!["No migrations defined"]);
    }
}
