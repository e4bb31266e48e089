//! Method enforcement for the two core operations.
//!
//! Each operation has exactly one allowed HTTP method. Anything else,
//! including `HEAD` and `OPTIONS`, is refused before core logic runs.

use axum::http::Method;
use std::fmt;
use thiserror::Error;

/// Core operations reachable over HTTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// `POST /auth`
    IssueToken,
    /// `GET /.well-known/jwks.json`
    PublishDiscovery,
}

impl Operation {
    /// The only method accepted for this operation.
    #[must_use]
    pub fn allowed_method(self) -> Method {
        match self {
            Self::IssueToken => Method::POST,
            Self::PublishDiscovery => Method::GET,
        }
    }

    /// Name used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::IssueToken => "issue_token",
            Self::PublishDiscovery => "publish_discovery",
        }
    }

    /// Body of the generic 500 returned when the operation fails.
    #[must_use]
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::IssueToken => "Error generating token",
            Self::PublishDiscovery => "Error fetching keys",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request used the wrong method for its operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{method} not allowed for {operation}, expected {}", .operation.allowed_method())]
pub struct MethodNotAllowed {
    /// Operation that was targeted
    pub operation: Operation,
    /// Method the request used
    pub method: Method,
}

/// Admit `method` for `operation` or refuse it.
///
/// # Errors
///
/// Returns [`MethodNotAllowed`] for any method other than the designated one.
pub fn gate(operation: Operation, method: &Method) -> Result<(), MethodNotAllowed> {
    if *method == operation.allowed_method() {
        Ok(())
    } else {
        Err(MethodNotAllowed {
            operation,
            method: method.clone(),
        })
    }
}
