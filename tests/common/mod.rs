//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::time::Duration;

use books_inventory::config::ServiceConfig;
use books_inventory::{HttpServer, RequestLog, Shutdown};
use tempfile::TempDir;
use tokio::net::TcpListener;

/// A running service bound to an ephemeral port.
pub struct TestService {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
    pub log_dir: TempDir,
    shutdown: Shutdown,
}

impl TestService {
    /// Boot a fresh service with its log files in a temp directory.
    pub async fn start() -> Self {
        let log_dir = tempfile::tempdir().unwrap();

        let mut config = ServiceConfig::default();
        config.listener.bind_address = "127.0.0.1:0".into();
        config.logging.directory = log_dir.path().display().to_string();
        config.logging.request_console = false;

        let logs = RequestLog::from_config(&config.logging).unwrap();
        let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
        let addr = listener.local_addr().unwrap();

        let shutdown = Shutdown::new();
        let server = HttpServer::new(config, logs);
        let server_shutdown = shutdown.subscribe();
        tokio::spawn(async move {
            let _ = server.run(listener, server_shutdown).await;
        });

        let client = reqwest::Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        Self {
            addr,
            client,
            log_dir,
            shutdown,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Create a book, returning the assigned id.
    #[allow(dead_code)]
    pub async fn create_book(&self, title: &str, year: i64, price: i64, genres: &[&str]) -> u64 {
        let res = self
            .client
            .post(self.url("/book"))
            .json(&serde_json::json!({
                "title": title,
                "author": "Test Author",
                "year": year,
                "price": price,
                "genres": genres,
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 200, "create {title} failed");
        let body: serde_json::Value = res.json().await.unwrap();
        body["result"].as_u64().unwrap()
    }

    #[allow(dead_code)]
    pub fn read_log(&self, file: &str) -> String {
        std::fs::read_to_string(self.log_dir.path().join(file)).unwrap_or_default()
    }
}

impl Drop for TestService {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}
