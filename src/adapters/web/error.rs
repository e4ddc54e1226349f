//! HTTP error responses for the web adapter.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::domain::error::SimError;

#[derive(Debug)]
pub struct WebError {
    pub status: StatusCode,
    pub message: String,
}

impl WebError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

pub fn status_from_error(err: &SimError) -> StatusCode {
    match err {
        SimError::StockNotFound { .. } => StatusCode::NOT_FOUND,
        SimError::InsufficientFunds { .. }
        | SimError::InsufficientShares { .. }
        | SimError::InvalidAmount { .. } => StatusCode::BAD_REQUEST,
        SimError::ConfigParse { .. }
        | SimError::ConfigInvalid { .. }
        | SimError::Universe(_)
        | SimError::Export { .. }
        | SimError::Server { .. }
        | SimError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<SimError> for WebError {
    fn from(err: SimError) -> Self {
        Self::new(status_from_error(&err), err.to_string())
    }
}

impl From<JsonRejection> for WebError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(format!("invalid request body: {}", rejection.body_text()))
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, "{}", self.message);
        } else {
            tracing::warn!(status = %self.status, "{}", self.message);
        }
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_statuses() {
        let not_found = WebError::from(SimError::StockNotFound {
            name: "ZZZZ".into(),
        });
        assert_eq!(not_found.status, StatusCode::NOT_FOUND);
        assert_eq!(not_found.message, "Stock not found");

        let invalid = WebError::from(SimError::InvalidAmount {
            amount: "-1".into(),
        });
        assert_eq!(invalid.status, StatusCode::BAD_REQUEST);

        let io = WebError::from(SimError::Io(std::io::Error::other("disk")));
        assert_eq!(io.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
