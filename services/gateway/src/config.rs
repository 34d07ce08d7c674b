//! Gateway configuration
//!
//! Everything comes from the environment with conservative defaults, so a
//! bare `gateway` invocation serves localhost and deployments override per
//! instance.

use std::env;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{key} must be a positive integer, got {value:?}")]
    BadQueueSize { key: &'static str, value: String },
}

/// Runtime configuration for the gateway process.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Listen address for the TCP accept loop (`ADDR`).
    pub listen_addr: String,
    /// Capacity of the command channel into the engine (`CMD_QUEUE`).
    pub command_queue: usize,
    /// Capacity of each connection's private event queue (`EVT_QUEUE`).
    pub private_queue: usize,
    /// Capacity of the public market-data broadcast ring (`BCAST_QUEUE`).
    pub public_queue: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:9000".to_string(),
            command_queue: 10_000,
            private_queue: 2_048,
            public_queue: 8_192,
        }
    }
}

impl GatewayConfig {
    /// Read configuration from the environment, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Ok(addr) = env::var("ADDR") {
            config.listen_addr = addr;
        }
        config.command_queue = read_queue_size("CMD_QUEUE", config.command_queue)?;
        config.private_queue = read_queue_size("EVT_QUEUE", config.private_queue)?;
        config.public_queue = read_queue_size("BCAST_QUEUE", config.public_queue)?;
        Ok(config)
    }
}

// Channel constructors reject zero capacity, so catch it at startup where
// the operator can see it.
fn read_queue_size(key: &'static str, default: usize) -> Result<usize, ConfigError> {
    match env::var(key) {
        Ok(value) => match value.parse::<usize>() {
            Ok(size) if size > 0 => Ok(size),
            _ => Err(ConfigError::BadQueueSize { key, value }),
        },
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GatewayConfig::default();
        assert_eq!(config.listen_addr, "0.0.0.0:9000");
        assert_eq!(config.command_queue, 10_000);
        assert_eq!(config.private_queue, 2_048);
        assert_eq!(config.public_queue, 8_192);
    }

    #[test]
    fn test_bad_queue_size_is_an_error() {
        let result = read_queue_size("GATEWAY_TEST_QUEUE", 16);
        assert!(result.is_ok(), "unset variable falls back to the default");

        std::env::set_var("GATEWAY_TEST_QUEUE", "zero");
        assert!(read_queue_size("GATEWAY_TEST_QUEUE", 16).is_err());
        std::env::set_var("GATEWAY_TEST_QUEUE", "0");
        assert!(read_queue_size("GATEWAY_TEST_QUEUE", 16).is_err());
        std::env::set_var("GATEWAY_TEST_QUEUE", "64");
        assert_eq!(read_queue_size("GATEWAY_TEST_QUEUE", 16).unwrap(), 64);
        std::env::remove_var("GATEWAY_TEST_QUEUE");
    }
}
