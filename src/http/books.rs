//! Book endpoint handlers.
//!
//! Each handler decodes its input, runs one store operation under the store
//! lock, records domain events on the `books` stream and renders the envelope.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::books::{BookError, NewBook};
use crate::http::request::{FilterQuery, IdQuery, PriceQuery, QueryPairs};
use crate::http::response::{ok, ApiError};
use crate::http::server::AppState;

/// `GET /books/health`
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// `POST /book`
pub async fn create_book(
    State(state): State<AppState>,
    payload: Result<Json<NewBook>, JsonRejection>,
) -> Response {
    let events = state.logs.books();

    let new_book = match payload {
        Ok(Json(new_book)) => new_book,
        Err(rejection) => {
            let message = format!("Error: invalid book payload: {}", rejection.body_text());
            events.error(&message);
            return ApiError::bad_request(message).into_response();
        }
    };

    let title = new_book.title.clone();
    let mut store = state.store();
    match store.create(new_book) {
        Ok(id) => {
            events.info(format!("Creating new Book with Title [{}]", title));
            events.debug(format!(
                "Currently there are {} Books in the system. New Book will be assigned with id {}",
                store.len() - 1,
                id
            ));
            ok(id)
        }
        Err(e) => reject(&state, e),
    }
}

/// `GET /books/total`
pub async fn count_books(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
) -> Response {
    let filter = match FilterQuery::from_pairs(&pairs).into_filter() {
        Ok(filter) => filter,
        Err(e) => return reject(&state, e),
    };

    let total = state.store().count(&filter);
    state
        .logs
        .books()
        .info(format!("Total Books found for requested filters is {}", total));
    ok(total)
}

/// `GET /books`
pub async fn list_books(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
) -> Response {
    let filter = match FilterQuery::from_pairs(&pairs).into_filter() {
        Ok(filter) => filter,
        Err(e) => return reject(&state, e),
    };

    let books = state.store().list(&filter);
    state
        .logs
        .books()
        .info(format!("Total Books found for requested filters is {}", books.len()));
    ok(books)
}

/// `GET /book?id=`
pub async fn get_book(State(state): State<AppState>, Query(pairs): Query<QueryPairs>) -> Response {
    let id = match IdQuery::from_pairs(&pairs).book_id() {
        Ok(id) => id,
        Err(e) => return reject(&state, e),
    };

    state
        .logs
        .books()
        .debug(format!("Fetching book id {} details", id));

    let store = state.store();
    let book = match store.get(id) {
        Ok(book) => book,
        Err(e) => return reject(&state, e),
    };
    ok(book)
}

/// `PUT /book?id=&price=`
pub async fn update_book_price(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
) -> Response {
    let query = PriceQuery::from_pairs(&pairs);
    let new_price = match query.new_price() {
        Ok(price) => price,
        Err(e) => return reject(&state, e),
    };
    let id = match query.book_id() {
        Ok(id) => id,
        Err(e) => return reject(&state, e),
    };

    let mut store = state.store();
    match store.update_price(id, new_price) {
        Ok(old_price) => {
            let events = state.logs.books();
            events.info(format!("Update Book id [{}] price to {}", id, new_price));
            if let Ok(book) = store.get(id) {
                events.debug(format!(
                    "Book [{}] price change: {} --> {}",
                    book.title, old_price, new_price
                ));
            }
            ok(old_price)
        }
        Err(e) => reject(&state, e),
    }
}

/// `DELETE /book?id=`
pub async fn delete_book(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
) -> Response {
    let id = match IdQuery::from_pairs(&pairs).book_id() {
        Ok(id) => id,
        Err(e) => return reject(&state, e),
    };

    let mut store = state.store();
    let title = match store.get(id) {
        Ok(book) => book.title.clone(),
        Err(e) => return reject(&state, e),
    };

    match store.delete(id) {
        Ok(remaining) => {
            let events = state.logs.books();
            events.info(format!("Removing book [{}]", title));
            events.debug(format!(
                "After removing book [{}] id: [{}] there are {} books in the system",
                title, id, remaining
            ));
            ok(remaining)
        }
        Err(e) => reject(&state, e),
    }
}

/// Record a validation failure on the `books` stream and render it.
fn reject(state: &AppState, err: BookError) -> Response {
    state.logs.books().error(err.to_string());
    ApiError::from(err).into_response()
}
