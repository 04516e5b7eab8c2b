//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP middleware / handlers produce:
//!     → request_log.rs (sequence-tagged entries on `request` and `books`)
//!     → logging.rs (threshold check, line written to the stream file)
//!
//! Consumers:
//!     → logs/requests.log, logs/books.log (append-only text)
//!     → tracing subscriber (console, for mirrored streams)
//! ```
//!
//! # Design Decisions
//! - One integer request number is the only correlation between entries
//! - Stream thresholds are adjustable at runtime through the HTTP API
//! - Process-level diagnostics go straight to tracing

pub mod logging;
pub mod request_log;

pub use logging::{init_tracing, LogError, LogLevel, LogStream, StreamName};
pub use request_log::{RequestLog, StreamWriter};
