//! Request parsing and lifecycle logging.
//!
//! # Responsibilities
//! - Decode query parameters into typed values
//! - Build book filters from the shared filter parameters
//! - Record the start and end of every routed request
//!
//! # Design Decisions
//! - A repeated parameter keeps its first value; later ones are ignored
//! - Numeric parameters that do not parse are treated as absent
//! - Genre tags are validated before any filtering runs
//! - The lifecycle middleware holds the request gate for the whole request,
//!   so all entries of one request share one sequence number

use std::time::Instant;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::books::{parse_genres, BookError, BookFilter, BookResult};
use crate::http::server::AppState;

/// Decoded query string, in the order the client sent it.
pub type QueryPairs = Vec<(String, String)>;

/// Filter parameters shared by `GET /books` and `GET /books/total`.
#[derive(Debug, Default)]
pub struct FilterQuery {
    pub author: Option<String>,
    pub price_bigger_than: Option<String>,
    pub price_less_than: Option<String>,
    pub year_bigger_than: Option<String>,
    pub year_less_than: Option<String>,
    pub genres: Option<String>,
}

impl FilterQuery {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            author: first_value(pairs, "author"),
            price_bigger_than: first_value(pairs, "price-bigger-than"),
            price_less_than: first_value(pairs, "price-less-than"),
            year_bigger_than: first_value(pairs, "year-bigger-than"),
            year_less_than: first_value(pairs, "year-less-than"),
            genres: first_value(pairs, "genres"),
        }
    }

    /// Convert into a filter, failing on unknown genre tags.
    pub fn into_filter(self) -> BookResult<BookFilter> {
        let genres = self.genres.as_deref().map(parse_genres).transpose()?;

        Ok(BookFilter {
            author: self.author,
            price_bigger_than: lenient_int(self.price_bigger_than.as_deref()),
            price_less_than: lenient_int(self.price_less_than.as_deref()),
            year_bigger_than: lenient_int(self.year_bigger_than.as_deref()),
            year_less_than: lenient_int(self.year_less_than.as_deref()),
            genres,
        })
    }
}

/// `?id=` addressing a single book.
#[derive(Debug, Default)]
pub struct IdQuery {
    pub id: Option<String>,
}

impl IdQuery {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            id: first_value(pairs, "id"),
        }
    }

    pub fn book_id(&self) -> BookResult<u64> {
        parse_id(self.id.as_deref())
    }
}

/// `?id=&price=` for price updates.
#[derive(Debug, Default)]
pub struct PriceQuery {
    pub id: Option<String>,
    pub price: Option<String>,
}

impl PriceQuery {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            id: first_value(pairs, "id"),
            price: first_value(pairs, "price"),
        }
    }

    pub fn book_id(&self) -> BookResult<u64> {
        parse_id(self.id.as_deref())
    }

    /// The requested price, if present and strictly positive.
    pub fn new_price(&self) -> BookResult<i64> {
        lenient_int(self.price.as_deref())
            .filter(|price| *price > 0)
            .ok_or_else(|| {
                BookError::InvalidPrice(display_id(self.id.as_deref()).to_string())
            })
    }
}

/// `?logger-name=&logger-level=` for the log level endpoints.
#[derive(Debug, Default)]
pub struct LoggerQuery {
    pub logger_name: Option<String>,
    pub logger_level: Option<String>,
}

impl LoggerQuery {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            logger_name: first_value(pairs, "logger-name"),
            logger_level: first_value(pairs, "logger-level"),
        }
    }
}

fn first_value(pairs: &[(String, String)], key: &str) -> Option<String> {
    pairs
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.clone())
}

fn lenient_int(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|value| value.trim().parse().ok())
}

fn display_id(raw: Option<&str>) -> &str {
    raw.unwrap_or("(missing)")
}

fn parse_id(raw: Option<&str>) -> BookResult<u64> {
    raw.and_then(|value| value.trim().parse().ok())
        .ok_or_else(|| BookError::NotFound(display_id(raw).to_string()))
}

/// Log request start and duration around every routed handler.
pub async fn request_log_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let _turn = state.gate.lock().await;
    let start = Instant::now();

    state
        .logs
        .begin_request(request.uri().path(), request.method().as_str());

    let response = next.run(request).await;

    state.logs.end_request(start.elapsed().as_millis());
    response
}
