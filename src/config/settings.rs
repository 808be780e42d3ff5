//! # Configuration Settings
//!
//! Defines the configuration structure for the control plane. Everything
//! is loaded once at startup from `WARDPLANE_`-prefixed environment
//! variables; nothing here is mutable afterwards. In particular the
//! worker shared secret is fixed for the lifetime of the process, so
//! rotating it is an explicit redeploy of control plane and workers.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::{Error, Result};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
pub struct AppConfig {
    /// HTTP server configuration
    #[validate(nested)]
    pub server: ServerConfig,

    /// Database configuration
    #[validate(nested)]
    pub database: DatabaseConfig,

    /// Worker endpoint authentication configuration
    #[validate(nested)]
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let config = Self {
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env()?,
        };
        config.validate_all()?;
        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate_all(&self) -> Result<()> {
        Validate::validate(self).map_err(Error::from)?;

        if !self.database.url.starts_with("sqlite:") {
            return Err(Error::validation("Database URL must start with 'sqlite:'"));
        }

        // 32 bytes of shared secret is the floor for the worker gate;
        // anything shorter is guessable enough to be a config mistake.
        if self.auth.worker_shared_secret.len() < 32 {
            return Err(Error::validation(
                "Worker shared secret must be at least 32 characters long",
            ));
        }

        Ok(())
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ServerConfig {
    /// Server bind address
    #[validate(length(min = 1, message = "Host cannot be empty"))]
    pub host: String,

    /// Server port
    #[validate(range(min = 1, message = "Port must be non-zero"))]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".to_string(), port: 8080 }
    }
}

impl ServerConfig {
    fn from_env() -> Result<Self> {
        let host =
            std::env::var("WARDPLANE_API_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = std::env::var("WARDPLANE_API_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|e| Error::config(format!("Invalid API port: {}", e)))?;
        Ok(Self { host, port })
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DatabaseConfig {
    /// Database connection URL
    #[validate(length(min = 1, message = "Database URL cannot be empty"))]
    pub url: String,

    /// Maximum pool connections
    #[validate(range(min = 1, message = "max_connections must be greater than 0"))]
    pub max_connections: u32,

    /// Minimum pool connections
    pub min_connections: u32,

    /// Connection acquire timeout in seconds
    pub connect_timeout_seconds: u64,

    /// Run embedded migrations on startup
    pub auto_migrate: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://wardplane.db".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_seconds: 5,
            auto_migrate: true,
        }
    }
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            url: std::env::var("WARDPLANE_DATABASE_URL").unwrap_or(defaults.url),
            max_connections: std::env::var("WARDPLANE_DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_connections),
            min_connections: std::env::var("WARDPLANE_DATABASE_MIN_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.min_connections),
            connect_timeout_seconds: defaults.connect_timeout_seconds,
            auto_migrate: std::env::var("WARDPLANE_DATABASE_AUTO_MIGRATE")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(defaults.auto_migrate),
        }
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }
}

/// Worker endpoint authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
pub struct AuthConfig {
    /// Shared secret presented by workers in `x-worker-secret`
    #[serde(skip_serializing)]
    pub worker_shared_secret: String,
}

impl AuthConfig {
    fn from_env() -> Result<Self> {
        let worker_shared_secret = std::env::var("WARDPLANE_WORKER_SHARED_SECRET")
            .map_err(|_| Error::config("WARDPLANE_WORKER_SHARED_SECRET must be set"))?;
        Ok(Self { worker_shared_secret })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> AppConfig {
        AppConfig {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig {
                worker_shared_secret: "0123456789abcdef0123456789abcdef".to_string(),
            },
        }
    }

    #[test]
    fn accepts_valid_configuration() {
        assert!(valid_config().validate_all().is_ok());
    }

    #[test]
    fn rejects_short_worker_secret() {
        let mut config = valid_config();
        config.auth.worker_shared_secret = "too-short".to_string();
        assert!(config.validate_all().is_err());
    }

    #[test]
    fn rejects_non_sqlite_url() {
        let mut config = valid_config();
        config.database.url = "mysql://localhost/wardplane".to_string();
        assert!(config.validate_all().is_err());
    }
}
