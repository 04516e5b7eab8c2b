//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, request lifecycle logging)
//! - Own the shared application state (book store, request log)
//! - Bind server to listener and shut down on signal

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::books::BookStore;
use crate::config::ServiceConfig;
use crate::http::books::{
    count_books, create_book, delete_book, get_book, health, list_books, update_book_price,
};
use crate::http::logs::{get_log_level, set_log_level};
use crate::http::request::request_log_middleware;
use crate::observability::RequestLog;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub books: Arc<Mutex<BookStore>>,
    pub logs: Arc<RequestLog>,
    /// Serializes request handling so lifecycle and domain entries line up.
    pub gate: Arc<tokio::sync::Mutex<()>>,
}

impl AppState {
    pub fn new(store: BookStore, logs: RequestLog) -> Self {
        Self {
            books: Arc::new(Mutex::new(store)),
            logs: Arc::new(logs),
            gate: Arc::new(tokio::sync::Mutex::new(())),
        }
    }

    /// Lock the book store.
    pub fn store(&self) -> MutexGuard<'_, BookStore> {
        self.books.lock().expect("book store mutex poisoned")
    }
}

/// HTTP server for the books service.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
    state: AppState,
}

impl HttpServer {
    /// Create a server with an empty book store.
    pub fn new(config: ServiceConfig, logs: RequestLog) -> Self {
        Self::with_state(config, AppState::new(BookStore::new(), logs))
    }

    /// Create a server around existing state.
    pub fn with_state(config: ServiceConfig, state: AppState) -> Self {
        let router = Self::build_router(&config, state.clone());
        Self {
            router,
            config,
            state,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        Router::new()
            .route("/books/health", get(health))
            .route(
                "/book",
                post(create_book)
                    .get(get_book)
                    .put(update_book_price)
                    .delete(delete_book),
            )
            .route("/books/total", get(count_books))
            .route("/books", get(list_books))
            .route("/logs/level", get(get_log_level).put(set_log_level))
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                request_log_middleware,
            ))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http())
    }

    /// A clone of the fully layered router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Shared state, for inspection.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Run the server until a shutdown signal is broadcast.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
