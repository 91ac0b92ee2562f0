//! # Configuration Management
//!
//! Environment-driven configuration for the batching engine, the HTTP
//! server, and the database-backed sink. Every setting has a default so the
//! service starts without any environment at all; malformed values fail
//! loudly with a [`BatcherError::Configuration`].

use crate::error::{BatcherError, Result};

/// Settings for one `MicroBatcher` instance. Fixed for its lifetime.
#[derive(Debug, Clone)]
pub struct BatcherSettings {
    /// Number of queued jobs that triggers an immediate flush.
    pub batch_size: usize,
    /// Interval between timer-driven flushes, in milliseconds.
    pub batch_frequency_ms: u64,
}

impl Default for BatcherSettings {
    fn default() -> Self {
        Self {
            batch_size: 3,
            batch_frequency_ms: 10_000,
        }
    }
}

impl BatcherSettings {
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(BatcherError::Configuration(
                "batch_size must be at least 1".to_string(),
            ));
        }
        if self.batch_frequency_ms == 0 {
            return Err(BatcherError::Configuration(
                "batch_frequency_ms must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Connection settings for the payment sink database.
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
    pub max_connections: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            host: "db".to_string(),
            port: 5432,
            name: "db".to_string(),
            user: "user".to_string(),
            password: "password".to_string(),
            max_connections: 5,
        }
    }
}

impl DatabaseSettings {
    pub fn connect_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user, self.password, self.host, self.port, self.name
        )
    }
}

/// HTTP server settings.
#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { port: 3000 }
    }
}

impl ServerSettings {
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub batcher: BatcherSettings,
    pub database: DatabaseSettings,
    pub server: ServerSettings,
}

impl AppConfig {
    /// Load configuration from the environment, falling back to defaults
    /// for any variable that is not set.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(batch_size) = std::env::var("BATCH_SIZE") {
            config.batcher.batch_size = batch_size.parse().map_err(|e| {
                BatcherError::Configuration(format!("Invalid BATCH_SIZE: {e}"))
            })?;
        }

        if let Ok(batch_frequency) = std::env::var("BATCH_FREQUENCY") {
            config.batcher.batch_frequency_ms = batch_frequency.parse().map_err(|e| {
                BatcherError::Configuration(format!("Invalid BATCH_FREQUENCY: {e}"))
            })?;
        }

        if let Ok(host) = std::env::var("DB_HOST") {
            config.database.host = host;
        }

        if let Ok(port) = std::env::var("DB_PORT") {
            config.database.port = port.parse().map_err(|e| {
                BatcherError::Configuration(format!("Invalid DB_PORT: {e}"))
            })?;
        }

        if let Ok(name) = std::env::var("DB_NAME") {
            config.database.name = name;
        }

        if let Ok(user) = std::env::var("DB_USER") {
            config.database.user = user;
        }

        if let Ok(password) = std::env::var("DB_PASSWORD") {
            config.database.password = password;
        }

        if let Ok(max_connections) = std::env::var("DB_MAX_CONNECTIONS") {
            config.database.max_connections = max_connections.parse().map_err(|e| {
                BatcherError::Configuration(format!("Invalid DB_MAX_CONNECTIONS: {e}"))
            })?;
        }

        if let Ok(port) = std::env::var("PORT") {
            config.server.port = port.parse().map_err(|e| {
                BatcherError::Configuration(format!("Invalid PORT: {e}"))
            })?;
        }

        config.batcher.validate()?;

        Ok(config)
    }
}
