//! Book filter predicate.
//!
//! # Responsibilities
//! - Match author (exact, case-insensitive)
//! - Match inclusive price and year bounds
//! - Match genres with OR semantics inside the clause
//! - Combine clauses with AND semantics
//!
//! # Design Decisions
//! - Omitted clause = always matches
//! - Genre tags are validated when the filter is built, not while filtering
//! - Applying a filter collects retained books into a new Vec

use crate::books::error::BookResult;
use crate::books::types::{Book, Genre};

/// Conjunction of optional filter clauses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    pub author: Option<String>,
    pub price_bigger_than: Option<i64>,
    pub price_less_than: Option<i64>,
    pub year_bigger_than: Option<i64>,
    pub year_less_than: Option<i64>,
    pub genres: Option<Vec<Genre>>,
}

impl BookFilter {
    /// Filter that retains every book.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_price_range(mut self, bigger_than: Option<i64>, less_than: Option<i64>) -> Self {
        self.price_bigger_than = bigger_than;
        self.price_less_than = less_than;
        self
    }

    pub fn with_year_range(mut self, bigger_than: Option<i64>, less_than: Option<i64>) -> Self {
        self.year_bigger_than = bigger_than;
        self.year_less_than = less_than;
        self
    }

    pub fn with_genres(mut self, genres: Vec<Genre>) -> Self {
        self.genres = Some(genres);
        self
    }

    /// Returns true if the book passes every supplied clause.
    pub fn matches(&self, book: &Book) -> bool {
        self.author_matches(book)
            && within(book.price, self.price_bigger_than, self.price_less_than)
            && within(book.year, self.year_bigger_than, self.year_less_than)
            && self.genres_match(book)
    }

    /// Clone the books that pass the filter into a new Vec, preserving order.
    pub fn apply<'a, I>(&self, books: I) -> Vec<Book>
    where
        I: IntoIterator<Item = &'a Book>,
    {
        books
            .into_iter()
            .filter(|book| self.matches(book))
            .cloned()
            .collect()
    }

    fn author_matches(&self, book: &Book) -> bool {
        match &self.author {
            Some(author) => book.author.to_lowercase() == author.to_lowercase(),
            None => true,
        }
    }

    fn genres_match(&self, book: &Book) -> bool {
        match &self.genres {
            Some(genres) => book.has_any_genre(genres),
            None => true,
        }
    }
}

fn within(value: i64, lower: Option<i64>, upper: Option<i64>) -> bool {
    lower.map_or(true, |lower| value >= lower) && upper.map_or(true, |upper| value <= upper)
}

/// Parse a comma-separated genre list against the fixed vocabulary.
///
/// Fails on the first unrecognized tag, including an empty one.
pub fn parse_genres(raw: &str) -> BookResult<Vec<Genre>> {
    raw.split(',').map(str::parse::<Genre>).collect()
}
