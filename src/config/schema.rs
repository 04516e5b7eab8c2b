//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::observability::LogLevel;

/// Root configuration for the books service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Log stream and tracing settings.
    pub logging: LoggingConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8574").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8574".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Log stream configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Directory holding both stream files.
    pub directory: String,

    /// File name of the `request` stream.
    pub request_file: String,

    /// File name of the `books` stream.
    pub books_file: String,

    /// Initial threshold of the `request` stream.
    pub request_level: LogLevel,

    /// Initial threshold of the `books` stream.
    pub books_level: LogLevel,

    /// Mirror `request` entries to the console.
    pub request_console: bool,

    /// Mirror `books` entries to the console.
    pub books_console: bool,

    /// Default tracing filter when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: "logs".to_string(),
            request_file: "requests.log".to_string(),
            books_file: "books.log".to_string(),
            request_level: LogLevel::Info,
            books_level: LogLevel::Info,
            request_console: true,
            books_console: false,
            filter: "books_inventory=debug,tower_http=info".to_string(),
        }
    }
}
