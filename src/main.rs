//! Book inventory service (v1)
//!
//! An in-memory book catalogue served over HTTP with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                          ┌────────────────────────────────────────────┐
//!                          │              BOOKS SERVICE                 │
//!                          │                                            │
//!     Client Request       │  ┌─────────┐   ┌────────────┐   ┌───────┐  │
//!     ─────────────────────┼─▶│  http   │──▶│ request    │──▶│ books │  │
//!                          │  │ server  │   │ lifecycle  │   │ store │  │
//!                          │  └─────────┘   └─────┬──────┘   └───┬───┘  │
//!                          │                      │              │      │
//!                          │                      ▼              ▼      │
//!     Client Response      │               ┌──────────────────────────┐ │
//!     ◀────────────────────┼───────────────│ observability            │ │
//!                          │               │ request.log / books.log  │ │
//!                          │               └──────────────────────────┘ │
//!                          │                                            │
//!                          │  ┌────────┐  ┌───────────┐                 │
//!                          │  │ config │  │ lifecycle │                 │
//!                          │  └────────┘  └───────────┘                 │
//!                          └────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use books_inventory::config::load_or_default;
use books_inventory::lifecycle::{spawn_signal_listener, Shutdown};
use books_inventory::observability::init_tracing;
use books_inventory::{HttpServer, RequestLog};

#[derive(Parser)]
#[command(name = "books-inventory")]
#[command(about = "In-memory book inventory HTTP service", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = load_or_default(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    init_tracing(&config.logging.filter);

    tracing::info!("books-inventory v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        log_directory = %config.logging.directory,
        "Configuration loaded"
    );

    let logs = RequestLog::from_config(&config.logging)?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    let shutdown = Shutdown::new();
    spawn_signal_listener(&shutdown);

    let server = HttpServer::new(config, logs);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
