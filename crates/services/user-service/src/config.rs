//! User service configuration.

use std::env;

use common::{parse_bool, ConfigError, ServiceConfig};

/// User service configuration.
#[derive(Debug, Clone)]
pub struct UserServiceConfig {
    /// Shared service settings (name, log level)
    pub service: ServiceConfig,
    /// Fill the in-memory store with sample users at startup
    pub seed_demo_data: bool,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key/value source.
    ///
    /// The log level comes from `USER_SERVICE_LOG_LEVEL`, then `RUST_LOG`,
    /// then `info`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let log_level = lookup("USER_SERVICE_LOG_LEVEL")
            .or_else(|| lookup("RUST_LOG"))
            .unwrap_or_else(|| "info".to_string());

        let seed_demo_data = match lookup("USER_SERVICE_SEED_DEMO_DATA") {
            Some(value) => parse_bool("USER_SERVICE_SEED_DEMO_DATA", &value)?,
            None => true,
        };

        Ok(Self {
            service: ServiceConfig {
                service_name: "user-service".to_string(),
                log_level,
            },
            seed_demo_data,
        })
    }
}

impl Default for UserServiceConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                service_name: "user-service".to_string(),
                log_level: "info".to_string(),
            },
            seed_demo_data: true,
        }
    }
}
