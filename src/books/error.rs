//! Book store error definitions.

use thiserror::Error;

use crate::books::store::{MAX_YEAR, MIN_YEAR};

/// Validation failures raised by book store operations.
///
/// Every variant is request-local; none leaves the collection modified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookError {
    /// A book with the same title (ignoring case) already exists.
    #[error("Error: Book with the title [{0}] already exists in the system")]
    DuplicateTitle(String),

    /// Publication year outside the accepted range.
    #[error(
        "Error: Can't create new Book that its year [{0}] is not in the accepted range [{min} -> {max}]",
        min = MIN_YEAR,
        max = MAX_YEAR
    )]
    YearOutOfRange(i64),

    /// Creation price below zero.
    #[error("Error: Can't create new Book with negative price")]
    NegativePrice,

    /// Price update to a non-positive value.
    #[error("Error: price update for book {0} must be a positive integer")]
    InvalidPrice(String),

    /// No book carries the requested id.
    #[error("Error: no such Book with id {0}")]
    NotFound(String),

    /// Genre tag outside the fixed vocabulary.
    #[error("Invalid genre value: {0}")]
    UnknownGenre(String),
}

impl BookError {
    pub(crate) fn not_found(id: u64) -> Self {
        Self::NotFound(id.to_string())
    }
}

/// Result type for book store operations.
pub type BookResult<T> = Result<T, BookError>;
