//! Request logging facade.
//!
//! Owns the `request` and `books` streams plus the request sequence counter.
//! Every entry is tagged with the sequence number current at emission time;
//! `end_request` advances the counter for the next request.

use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::LoggingConfig;
use crate::observability::logging::{LogError, LogLevel, LogStream, StreamName};

/// Two leveled streams sharing one request sequence counter.
#[derive(Debug)]
pub struct RequestLog {
    request: LogStream,
    books: LogStream,
    sequence: AtomicU64,
}

impl RequestLog {
    /// Create a facade over existing streams. The sequence starts at 1.
    pub fn new(request: LogStream, books: LogStream) -> Self {
        Self {
            request,
            books,
            sequence: AtomicU64::new(1),
        }
    }

    /// Open both stream files under the configured directory.
    pub fn from_config(config: &LoggingConfig) -> io::Result<Self> {
        let dir = Path::new(&config.directory);
        let request = LogStream::open(
            StreamName::Request,
            config.request_level,
            &dir.join(&config.request_file),
            config.request_console,
        )?;
        let books = LogStream::open(
            StreamName::Books,
            config.books_level,
            &dir.join(&config.books_file),
            config.books_console,
        )?;

        tracing::info!(
            directory = %dir.display(),
            request_level = %config.request_level,
            books_level = %config.books_level,
            "Log streams opened"
        );

        Ok(Self::new(request, books))
    }

    /// Sequence number of the request in progress.
    pub fn sequence(&self) -> u64 {
        self.sequence.load(Ordering::SeqCst)
    }

    pub fn begin_request(&self, resource: &str, verb: &str) {
        let n = self.sequence();
        self.request.log(
            LogLevel::Info,
            n,
            &format!(
                "Incoming request | #{} | resource: {} | HTTP Verb {}",
                n,
                resource,
                verb.to_uppercase()
            ),
        );
    }

    pub fn end_request(&self, duration_ms: u128) {
        let n = self.sequence();
        self.request.log(
            LogLevel::Debug,
            n,
            &format!("request #{} duration: {}ms", n, duration_ms),
        );
        self.sequence.fetch_add(1, Ordering::SeqCst);
    }

    pub fn stream(&self, name: StreamName) -> &LogStream {
        match name {
            StreamName::Request => &self.request,
            StreamName::Books => &self.books,
        }
    }

    /// Threshold of the named stream.
    pub fn level(&self, stream: &str) -> Result<LogLevel, LogError> {
        let name: StreamName = stream.parse()?;
        Ok(self.stream(name).level())
    }

    /// Change the threshold of the named stream.
    ///
    /// The level is validated before the name; on any error nothing changes.
    pub fn set_level(&self, stream: &str, level: &str) -> Result<LogLevel, LogError> {
        let level: LogLevel = level.parse()?;
        let name: StreamName = stream.parse()?;
        self.stream(name).set_level(level);

        tracing::info!(stream = %name, level = %level, "Log level changed");
        Ok(level)
    }

    /// Writer for request lifecycle entries.
    pub fn request(&self) -> StreamWriter<'_> {
        StreamWriter {
            stream: &self.request,
            sequence: &self.sequence,
        }
    }

    /// Writer for book domain events.
    pub fn books(&self) -> StreamWriter<'_> {
        StreamWriter {
            stream: &self.books,
            sequence: &self.sequence,
        }
    }
}

/// Tags entries on one stream with the current request number.
#[derive(Debug, Clone, Copy)]
pub struct StreamWriter<'a> {
    stream: &'a LogStream,
    sequence: &'a AtomicU64,
}

impl StreamWriter<'_> {
    pub fn error(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Error, message.as_ref());
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Info, message.as_ref());
    }

    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Debug, message.as_ref());
    }

    fn log(&self, level: LogLevel, message: &str) {
        self.stream
            .log(level, self.sequence.load(Ordering::SeqCst), message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::logging::tests::SharedBuffer;

    fn facade(request_level: LogLevel) -> (RequestLog, SharedBuffer, SharedBuffer) {
        let request_buf = SharedBuffer::default();
        let books_buf = SharedBuffer::default();
        let log = RequestLog::new(
            LogStream::new(
                StreamName::Request,
                request_level,
                Box::new(request_buf.clone()),
                false,
            ),
            LogStream::new(
                StreamName::Books,
                LogLevel::Info,
                Box::new(books_buf.clone()),
                false,
            ),
        );
        (log, request_buf, books_buf)
    }

    #[test]
    fn test_sequence_advances_on_end() {
        let (log, request_buf, _) = facade(LogLevel::Debug);
        assert_eq!(log.sequence(), 1);

        log.begin_request("/books/health", "get");
        log.end_request(3);
        assert_eq!(log.sequence(), 2);

        log.begin_request("/book", "POST");

        let out = request_buf.contents();
        assert!(out.contains(
            "INFO: Incoming request | #1 | resource: /books/health | HTTP Verb GET | request #1"
        ));
        assert!(out.contains("DEBUG: request #1 duration: 3ms | request #1"));
        assert!(out.contains(
            "Incoming request | #2 | resource: /book | HTTP Verb POST | request #2"
        ));
    }

    #[test]
    fn test_default_info_hides_duration() {
        let (log, request_buf, _) = facade(LogLevel::Info);
        log.begin_request("/books", "GET");
        log.end_request(0);
        assert!(!request_buf.contents().contains("duration"));
        assert_eq!(log.sequence(), 2);
    }

    #[test]
    fn test_domain_events_carry_current_number() {
        let (log, _, books_buf) = facade(LogLevel::Info);
        log.books().info("first");
        log.end_request(1);
        log.books().error("second");
        log.books().debug("filtered out");

        let out = books_buf.contents();
        assert!(out.contains("INFO: first | request #1"));
        assert!(out.contains("ERROR: second | request #2"));
        assert!(!out.contains("filtered out"));
    }

    #[test]
    fn test_get_and_set_level() {
        let (log, _, _) = facade(LogLevel::Info);
        assert_eq!(log.level("books"), Ok(LogLevel::Info));
        assert_eq!(log.level("request-logger"), Ok(LogLevel::Info));
        assert_eq!(log.level("other"), Err(LogError::UnknownStream("other".into())));

        assert_eq!(log.set_level("books", "debug"), Ok(LogLevel::Debug));
        assert_eq!(log.level("books"), Ok(LogLevel::Debug));
        assert_eq!(log.level("request"), Ok(LogLevel::Info));
    }

    #[test]
    fn test_invalid_level_leaves_prior_level() {
        let (log, _, _) = facade(LogLevel::Info);
        log.set_level("books", "ERROR").unwrap();

        assert_eq!(
            log.set_level("books", "VERBOSE"),
            Err(LogError::InvalidLevel("VERBOSE".into()))
        );
        assert_eq!(log.level("books"), Ok(LogLevel::Error));

        // level is checked before the name
        assert_eq!(
            log.set_level("nope", "VERBOSE"),
            Err(LogError::InvalidLevel("VERBOSE".into()))
        );
        assert_eq!(
            log.set_level("nope", "DEBUG"),
            Err(LogError::UnknownStream("nope".into()))
        );
    }

    #[test]
    fn test_from_config_opens_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoggingConfig {
            directory: dir.path().join("logs").display().to_string(),
            request_console: false,
            ..LoggingConfig::default()
        };

        let log = RequestLog::from_config(&config).unwrap();
        log.begin_request("/books", "GET");
        log.books().info("Total Books found for requested filters is 0");

        let requests = std::fs::read_to_string(dir.path().join("logs/requests.log")).unwrap();
        let books = std::fs::read_to_string(dir.path().join("logs/books.log")).unwrap();
        assert!(requests.contains("resource: /books | HTTP Verb GET"));
        assert!(books.contains("Total Books found for requested filters is 0 | request #1"));
    }
}
