//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, trace + timeout layers)
//!     → request.rs (lifecycle logging, query decoding)
//!     → books.rs / logs.rs (store operations, level changes)
//!     → response.rs ({"result"} / {"errorMessage"} envelopes)
//!     → Send to client
//! ```

pub mod books;
pub mod logs;
pub mod request;
pub mod response;
pub mod server;

pub use response::{ApiError, ApiResult};
pub use server::{AppState, HttpServer};
