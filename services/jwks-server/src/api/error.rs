//! API error responses.
//!
//! Core failures are logged with their operation and timestamp, then
//! collapsed into a generic 500. Nothing from the underlying error reaches
//! the response body.

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

use super::gate::{MethodNotAllowed, Operation};
use crate::error::ServiceError;

/// Body of every 405 response.
pub const METHOD_NOT_ALLOWED_BODY: &str = "Method Not Allowed";

/// API error type
#[derive(Error, Debug)]
pub enum ApiError {
    /// Refused by the request gate
    #[error(transparent)]
    MethodNotAllowed(#[from] MethodNotAllowed),

    /// A core operation failed
    #[error("{operation} failed at {timestamp}: {source}")]
    Core {
        /// Operation that failed
        operation: Operation,
        /// "now" used by the operation
        timestamp: i64,
        /// Underlying failure
        source: ServiceError,
    },
}

impl ApiError {
    /// Attach operation context to a core failure.
    #[must_use]
    pub fn core(operation: Operation, timestamp: i64, source: ServiceError) -> Self {
        Self::Core {
            operation,
            timestamp,
            source,
        }
    }

    /// Status code this error maps to.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::Core { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Self::MethodNotAllowed(refusal) => {
                warn!(
                    operation = %refusal.operation,
                    method = %refusal.method,
                    "Method not allowed"
                );
                (
                    status,
                    [(header::ALLOW, refusal.operation.allowed_method().to_string())],
                    METHOD_NOT_ALLOWED_BODY,
                )
                    .into_response()
            }
            Self::Core {
                operation,
                timestamp,
                source,
            } => {
                error!(
                    operation = %operation,
                    timestamp,
                    error = %source,
                    "Core operation failed"
                );
                (status, operation.failure_message()).into_response()
            }
        }
    }
}
