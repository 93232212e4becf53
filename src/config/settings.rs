//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DATABASE_NAME_PREFIX, DEFAULT_APP_ENV, DEFAULT_DATABASE_SERVER, DEFAULT_SERVER_HOST,
    DEFAULT_SERVER_PORT,
};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub environment: String,
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("environment", &self.environment)
            .field("database_url", &"[REDACTED]")
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env` when present).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let environment = env::var("APP_ENV").unwrap_or_else(|_| DEFAULT_APP_ENV.to_string());

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| default_database_url(&environment)),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
            environment,
        }
    }
}

/// Each environment gets its own database on the default server.
fn default_database_url(environment: &str) -> String {
    format!(
        "{}/{}{}",
        DEFAULT_DATABASE_SERVER, DATABASE_NAME_PREFIX, environment
    )
}
