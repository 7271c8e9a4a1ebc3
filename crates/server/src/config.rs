//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; the server starts with sensible defaults for
//! local development.
//!
//! - `GENERAL_STORE_HOST` - Bind address (default: 127.0.0.1)
//! - `GENERAL_STORE_PORT` - Listen port (default: 5000)
//! - `GENERAL_STORE_UPLOAD_DIR` - Directory for uploaded images (default: uploads)
//! - `GENERAL_STORE_CORS_ORIGIN` - Allowed CORS origin (default: any)
//! - `ADMIN_SEED_PASSWORD` - Password for the seeded admin account (default: admin123)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory uploaded images are written to and served from
    pub upload_dir: String,
    /// Allowed CORS origin; `None` allows any origin
    pub cors_origin: Option<String>,
    /// Password for the seeded admin account
    pub admin_seed_password: SecretString,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a set variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("GENERAL_STORE_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("GENERAL_STORE_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("GENERAL_STORE_PORT", "5000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("GENERAL_STORE_PORT".to_string(), e.to_string())
            })?;
        let upload_dir = get_env_or_default("GENERAL_STORE_UPLOAD_DIR", "uploads");
        let cors_origin = get_optional_env("GENERAL_STORE_CORS_ORIGIN");
        let admin_seed_password =
            SecretString::from(get_env_or_default("ADMIN_SEED_PASSWORD", "admin123"));
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            host,
            port,
            upload_dir,
            cors_origin,
            admin_seed_password,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 5000,
            upload_dir: "uploads".to_string(),
            cors_origin: None,
            admin_seed_password: SecretString::from("admin123"),
            sentry_dsn: None,
        }
    }
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
