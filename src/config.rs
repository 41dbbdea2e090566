//! Environment-driven configuration.

use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "SGHSS";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default access-token lifetime: 5 hours, matching the legacy deployment.
const DEFAULT_TOKEN_EXPIRY_SECS: i64 = 18_000;

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to (`SGHSS_BIND`).
    pub bind_addr: String,
    /// SQLite database file (`SGHSS_DATABASE`).
    pub database_path: PathBuf,
    /// Secret used to sign access tokens (`SGHSS_TOKEN_SECRET`).
    pub token_secret: String,
    /// Access-token lifetime in seconds (`SGHSS_TOKEN_EXPIRES`).
    pub token_expiry_secs: i64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("SGHSS_BIND").unwrap_or_else(|_| "127.0.0.1:8000".into()),
            database_path: std::env::var("SGHSS_DATABASE")
                .unwrap_or_else(|_| "sghss.db".into())
                .into(),
            token_secret: std::env::var("SGHSS_TOKEN_SECRET")
                .unwrap_or_else(|_| "dev-secret-key-change-in-production".into()),
            token_expiry_secs: std::env::var("SGHSS_TOKEN_EXPIRES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TOKEN_EXPIRY_SECS),
        }
    }
}
