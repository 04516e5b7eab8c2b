//! Leveled log streams.
//!
//! # Responsibilities
//! - Initialize the process-wide tracing subscriber
//! - Define the closed set of stream severities
//! - Write one line per entry to a stream's sink, gated by its threshold
//! - Change a stream's threshold at runtime
//!
//! # Design Decisions
//! - Thresholds are atomics so reads and updates never block writers
//! - Entry lines keep a fixed text layout: timestamp, level, message, request number
//! - Mirrored streams also emit a tracing event for console output

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `default_filter`.
pub fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Errors raised by log level management.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LogError {
    /// Stream name is neither `request` nor `books`.
    #[error("Invalid logger name")]
    UnknownStream(String),

    /// Level is not one of ERROR, INFO, DEBUG.
    #[error("Invalid logger level")]
    InvalidLevel(String),
}

/// Stream severity, ordered from least to most verbose.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LogLevel {
    Error = 0,
    Info = 1,
    Debug = 2,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }
}

impl From<u8> for LogLevel {
    fn from(val: u8) -> Self {
        match val {
            0 => LogLevel::Error,
            1 => LogLevel::Info,
            _ => LogLevel::Debug,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ERROR" => Ok(LogLevel::Error),
            "INFO" => Ok(LogLevel::Info),
            "DEBUG" => Ok(LogLevel::Debug),
            _ => Err(LogError::InvalidLevel(s.to_string())),
        }
    }
}

impl TryFrom<String> for LogLevel {
    type Error = LogError;

    fn try_from(value: String) -> Result<Self, LogError> {
        value.parse()
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        level.as_str().to_string()
    }
}

/// The two named log streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamName {
    /// Request lifecycle entries.
    Request,
    /// Book domain events.
    Books,
}

impl StreamName {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreamName::Request => "request",
            StreamName::Books => "books",
        }
    }
}

impl fmt::Display for StreamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts the short names and the `-logger` suffixed wire names.
impl FromStr for StreamName {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "request" | "request-logger" => Ok(StreamName::Request),
            "books" | "books-logger" => Ok(StreamName::Books),
            _ => Err(LogError::UnknownStream(s.to_string())),
        }
    }
}

/// A named log channel with its own severity threshold.
pub struct LogStream {
    name: StreamName,
    level: AtomicU8,
    sink: Mutex<Box<dyn Write + Send>>,
    mirror: bool,
}

impl LogStream {
    /// Create a stream writing to an arbitrary sink.
    pub fn new(
        name: StreamName,
        level: LogLevel,
        sink: Box<dyn Write + Send>,
        mirror: bool,
    ) -> Self {
        Self {
            name,
            level: AtomicU8::new(level as u8),
            sink: Mutex::new(sink),
            mirror,
        }
    }

    /// Open (or create) an append-only log file as the stream's sink.
    pub fn open(name: StreamName, level: LogLevel, path: &Path, mirror: bool) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(name, level, Box::new(file), mirror))
    }

    pub fn name(&self) -> StreamName {
        self.name
    }

    /// Current threshold.
    pub fn level(&self) -> LogLevel {
        LogLevel::from(self.level.load(Ordering::Relaxed))
    }

    pub fn set_level(&self, level: LogLevel) {
        self.level.store(level as u8, Ordering::Relaxed);
    }

    /// Returns true if an entry at `level` passes the threshold.
    pub fn enabled(&self, level: LogLevel) -> bool {
        level <= self.level()
    }

    /// Record an entry tagged with `request_number`.
    pub fn log(&self, level: LogLevel, request_number: u64, message: &str) {
        if !self.enabled(level) {
            return;
        }

        let line = format_entry(level, request_number, message);
        {
            let mut sink = self.sink.lock().expect("log sink mutex poisoned");
            if let Err(e) = sink.write_all(line.as_bytes()).and_then(|_| sink.flush()) {
                tracing::warn!(stream = %self.name, error = %e, "Failed to write log entry");
            }
        }

        if self.mirror {
            forward(self.name, level, request_number, message);
        }
    }
}

impl fmt::Debug for LogStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogStream")
            .field("name", &self.name)
            .field("level", &self.level())
            .field("mirror", &self.mirror)
            .finish()
    }
}

/// Render one entry line, newline included.
pub fn format_entry(level: LogLevel, request_number: u64, message: &str) -> String {
    format!(
        "{} {}: {} | request #{}\n",
        chrono::Local::now().format(TIMESTAMP_FORMAT),
        level,
        message,
        request_number
    )
}

fn forward(name: StreamName, level: LogLevel, request_number: u64, message: &str) {
    match (name, level) {
        (StreamName::Request, LogLevel::Error) => {
            tracing::error!(target: "books_inventory::request", request_number, "{}", message)
        }
        (StreamName::Request, LogLevel::Info) => {
            tracing::info!(target: "books_inventory::request", request_number, "{}", message)
        }
        (StreamName::Request, LogLevel::Debug) => {
            tracing::debug!(target: "books_inventory::request", request_number, "{}", message)
        }
        (StreamName::Books, LogLevel::Error) => {
            tracing::error!(target: "books_inventory::books", request_number, "{}", message)
        }
        (StreamName::Books, LogLevel::Info) => {
            tracing::info!(target: "books_inventory::books", request_number, "{}", message)
        }
        (StreamName::Books, LogLevel::Debug) => {
            tracing::debug!(target: "books_inventory::books", request_number, "{}", message)
        }
    }
}
