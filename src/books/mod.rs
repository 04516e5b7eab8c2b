//! Book store subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP handler
//!     → filter.rs (query clauses → BookFilter, genre vocabulary check)
//!     → store.rs (create / count / list / get / update_price / delete)
//!     → types.rs (Book records, serialized in field order)
//! ```
//!
//! # Design Decisions
//! - The store is a plain owned value; callers decide how to share it
//! - Filtering builds a new sequence of retained books, never mutating the source
//! - Ids come from a monotonic counter and are never reused
//! - The store has no knowledge of logging or HTTP

pub mod error;
pub mod filter;
pub mod store;
pub mod types;

pub use error::{BookError, BookResult};
pub use filter::{parse_genres, BookFilter};
pub use store::BookStore;
pub use types::{Book, Genre, NewBook};
