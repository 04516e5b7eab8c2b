//! Response envelopes.
//!
//! # Responsibilities
//! - Wrap successful payloads as `{"result": ...}`
//! - Render failures as `{"errorMessage": "..."}` with a 4xx status
//! - Map domain errors to HTTP status codes
//!
//! # Design Decisions
//! - Payload structs serialize in declaration order, never alphabetized
//! - Conflicts with existing state or business rules are 409, lookups 404, bad input 400

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::books::BookError;
use crate::observability::LogError;

/// Successful response body.
#[derive(Debug, Serialize)]
pub struct ApiResult<T> {
    pub result: T,
}

/// 200 with `{"result": result}`.
pub fn ok<T: Serialize>(result: T) -> Response {
    (StatusCode::OK, Json(ApiResult { result })).into_response()
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    #[serde(rename = "errorMessage")]
    error_message: &'a str,
}

/// A failed request: status plus human-readable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error_message: &self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<BookError> for ApiError {
    fn from(err: BookError) -> Self {
        let status = match err {
            BookError::DuplicateTitle(_)
            | BookError::YearOutOfRange(_)
            | BookError::NegativePrice
            | BookError::InvalidPrice(_) => StatusCode::CONFLICT,
            BookError::NotFound(_) => StatusCode::NOT_FOUND,
            BookError::UnknownGenre(_) => StatusCode::BAD_REQUEST,
        };
        Self::new(status, err.to_string())
    }
}

impl From<LogError> for ApiError {
    fn from(err: LogError) -> Self {
        Self::bad_request(err.to_string())
    }
}
