//! Mapping of service errors onto HTTP responses.

use crate::orders::OrderError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::fmt;

/// An error ready to be sent to the client.
///
/// | Code | Status | Cause |
/// |---|---|---|
/// | `VALIDATION_ERROR` | 400 | malformed body, missing field, non-positive quantity, oversized total |
/// | `NOT_FOUND` | 400 | unknown customer or product |
/// | `PERSISTENCE_ERROR` | 500 | order store failure |
/// | `INTERNAL_ERROR` | 500 | anything else |
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: "VALIDATION_ERROR",
            message: message.into(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl From<OrderError> for ApiError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::Validation(message) => Self::validation(message),
            OrderError::CustomerNotFound(_) | OrderError::ProductNotFound(_) => Self {
                status: StatusCode::BAD_REQUEST,
                code: "NOT_FOUND",
                message: e.to_string(),
            },
            OrderError::Persistence(source) => {
                tracing::error!(error = %source, "Order store failure");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    code: "PERSISTENCE_ERROR",
                    message: "Order store unavailable".to_string(),
                }
            }
            other => {
                tracing::error!(error = %other, "Internal error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    code: "INTERNAL_ERROR",
                    message: other.to_string(),
                }
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    code: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: &self.message,
            code: self.code,
        };
        (self.status, Json(body)).into_response()
    }
}
