//! In-memory book collection.

use crate::books::error::{BookError, BookResult};
use crate::books::filter::BookFilter;
use crate::books::types::{Book, NewBook};

/// Earliest accepted publication year.
pub const MIN_YEAR: i64 = 1940;
/// Latest accepted publication year.
pub const MAX_YEAR: i64 = 2100;

/// Owns the book collection and the id counter.
///
/// Ids start at 1, increase on every successful create and are never reused,
/// even after the book holding them is deleted.
#[derive(Debug, Clone)]
pub struct BookStore {
    books: Vec<Book>,
    next_id: u64,
}

impl BookStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            books: Vec::new(),
            next_id: 1,
        }
    }

    /// Validate and insert a new book, returning its id.
    ///
    /// Checks run in order: duplicate title, year range, negative price.
    pub fn create(&mut self, new_book: NewBook) -> BookResult<u64> {
        if self.title_taken(&new_book.title) {
            return Err(BookError::DuplicateTitle(new_book.title));
        }

        if !(MIN_YEAR..=MAX_YEAR).contains(&new_book.year) {
            return Err(BookError::YearOutOfRange(new_book.year));
        }

        if new_book.price < 0 {
            return Err(BookError::NegativePrice);
        }

        let id = self.next_id;
        self.books.push(Book {
            id,
            title: new_book.title,
            author: new_book.author,
            year: new_book.year,
            price: new_book.price,
            genres: new_book.genres,
        });
        self.next_id += 1;

        Ok(id)
    }

    /// Number of books passing the filter.
    pub fn count(&self, filter: &BookFilter) -> usize {
        self.books.iter().filter(|book| filter.matches(book)).count()
    }

    /// Books passing the filter, sorted by title ignoring case.
    ///
    /// The sort is stable, so titles equal up to case keep insertion order.
    pub fn list(&self, filter: &BookFilter) -> Vec<Book> {
        let mut books = filter.apply(&self.books);
        books.sort_by_cached_key(|book| book.title.to_lowercase());
        books
    }

    /// Look up a book by id.
    pub fn get(&self, id: u64) -> BookResult<&Book> {
        self.books
            .iter()
            .find(|book| book.id == id)
            .ok_or_else(|| BookError::not_found(id))
    }

    /// Replace a book's price, returning the previous one.
    ///
    /// The new price must be strictly positive, a tighter bound than creation.
    pub fn update_price(&mut self, id: u64, new_price: i64) -> BookResult<i64> {
        if new_price <= 0 {
            return Err(BookError::InvalidPrice(id.to_string()));
        }

        let book = self
            .books
            .iter_mut()
            .find(|book| book.id == id)
            .ok_or_else(|| BookError::not_found(id))?;

        Ok(std::mem::replace(&mut book.price, new_price))
    }

    /// Remove a book, returning how many remain.
    pub fn delete(&mut self, id: u64) -> BookResult<usize> {
        let index = self
            .books
            .iter()
            .position(|book| book.id == id)
            .ok_or_else(|| BookError::not_found(id))?;

        self.books.remove(index);
        Ok(self.books.len())
    }

    /// Total number of stored books.
    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Id the next successful create will receive.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    fn title_taken(&self, title: &str) -> bool {
        let title = title.to_lowercase();
        self.books.iter().any(|book| book.title.to_lowercase() == title)
    }
}

impl Default for BookStore {
    fn default() -> Self {
        Self::new()
    }
}
