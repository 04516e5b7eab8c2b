//! In-memory book inventory service library.

pub mod books;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use books::BookStore;
pub use config::schema::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use observability::RequestLog;
