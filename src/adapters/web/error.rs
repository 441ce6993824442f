//! HTTP error responses for the web adapter.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::domain::error::LedgerError;

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

pub fn status_from_error(err: &LedgerError) -> StatusCode {
    match err {
        LedgerError::BillNotFound { .. } | LedgerError::AccountNotFound { .. } => {
            StatusCode::NOT_FOUND
        }
        LedgerError::InsufficientFunds { .. } | LedgerError::Link { .. } => {
            StatusCode::BAD_REQUEST
        }
        LedgerError::Storage { .. }
        | LedgerError::SnapshotParse { .. }
        | LedgerError::ConfigParse { .. }
        | LedgerError::ConfigInvalid { .. }
        | LedgerError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<LedgerError> for WebError {
    fn from(err: LedgerError) -> Self {
        let status = status_from_error(&err);
        if status.is_server_error() {
            tracing::error!(error = %err, "request failed");
        }
        Self::new(status, err.to_string())
    }
}

/// Malformed or mistyped request bodies keep axum's status (400, 415, 422)
/// but use the same `{"detail": ...}` body as every other error.
impl From<JsonRejection> for WebError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.message }))).into_response()
    }
}
