//! Request-level error handling.
//!
//! Every handler returns `Result<_, AppError>`; the error is turned into a
//! JSON body of the form `{ "error": ..., "details": ... }` with the matching
//! HTTP status.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required input field is missing or has an unusable value.
    #[error("{0}")]
    Validation(String),

    /// The resource already exists (duplicate SKU).
    #[error("{0}")]
    Conflict(String),

    /// The referenced SKU does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The request body could not be parsed as the expected JSON.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// The persistence layer failed.
    #[error("{context}: {source}")]
    Store {
        context: &'static str,
        #[source]
        source: StoreError,
    },
}

impl AppError {
    /// Wraps a store failure with the message shown to the client.
    pub fn store(context: &'static str, source: StoreError) -> Self {
        Self::Store { context, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Conflict(_) | Self::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Wire shape of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl From<&AppError> for ErrorBody {
    fn from(err: &AppError) -> Self {
        match err {
            AppError::InvalidBody(details) => Self {
                error: "Invalid request body".to_string(),
                details: Some(details.clone()),
            },
            AppError::Store { context, source } => Self {
                error: (*context).to_string(),
                details: Some(source.to_string()),
            },
            other => Self {
                error: other.to_string(),
                details: None,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = %status, "Request rejected");
        }

        (status, Json(ErrorBody::from(&self))).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection.body_text())
    }
}
