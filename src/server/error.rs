//! Mapping of ledger errors onto HTTP responses

use crate::io::ErrorBody;
use crate::types::LedgerError;
use axum::extract::rejection::JsonRejection;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

/// Seconds a client should wait before resubmitting after contention
pub const RETRY_AFTER_SECS: u64 = 1;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("account not found: {0}")]
    UnknownAccount(String),

    #[error("malformed request body: {0}")]
    MalformedBody(String),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedBody(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::UnknownAccount(_) => StatusCode::NOT_FOUND,
            ApiError::MalformedBody(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Ledger(e) => match e {
                LedgerError::AccountNotFound { .. } => StatusCode::NOT_FOUND,
                LedgerError::Validation { .. }
                | LedgerError::InsufficientLimit { .. }
                | LedgerError::ArithmeticOverflow { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                LedgerError::Contention { .. } => StatusCode::SERVICE_UNAVAILABLE,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() && status != StatusCode::SERVICE_UNAVAILABLE {
            error!(error = %self, "request failed");
        }

        let body = Json(ErrorBody {
            erro: self.to_string(),
        });
        let mut response = (status, body).into_response();
        if status == StatusCode::SERVICE_UNAVAILABLE {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(RETRY_AFTER_SECS));
        }
        response
    }
}
