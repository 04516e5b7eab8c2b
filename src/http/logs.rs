//! Log level endpoint handlers.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::http::request::{LoggerQuery, QueryPairs};
use crate::http::response::{ok, ApiError};
use crate::http::server::AppState;

/// `GET /logs/level?logger-name=`
pub async fn get_log_level(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
) -> Response {
    let query = LoggerQuery::from_pairs(&pairs);
    let name = query.logger_name.as_deref().unwrap_or_default();
    match state.logs.level(name) {
        Ok(level) => ok(level.as_str()),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// `PUT /logs/level?logger-name=&logger-level=`
///
/// Answers in plain text: the new level on success, the error otherwise.
pub async fn set_log_level(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
) -> Response {
    let query = LoggerQuery::from_pairs(&pairs);
    let name = query.logger_name.as_deref().unwrap_or_default();
    let level = query.logger_level.as_deref().unwrap_or_default();

    match state.logs.set_level(name, level) {
        Ok(level) => (StatusCode::OK, level.to_string()).into_response(),
        Err(e) => {
            tracing::warn!(
                logger_name = name,
                logger_level = level,
                error = %e,
                "Rejected log level change"
            );
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}
