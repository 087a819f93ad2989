//! Error types for dataset existence checks.
//!
//! # Error Handling Strategy
//!
//! Checks distinguish two kinds of "bad news":
//!
//! - [`CheckError`]: the check could not be carried out. The identifier was
//!   malformed, no connection string was configured, or the backend failed.
//!   Returned as `Err` and never retried.
//!
//! - [`crate::Existence::Incomplete`]: the check succeeded and found a
//!   metadata record with missing attributes. This is a normal return value
//!   of [`crate::Checker::exists`], not an error.

use thiserror::Error;

/// Errors that can occur while constructing or running a checker.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError {
    /// The dotted identifier could not be split into a schema and table.
    #[error("malformed identifier `{identifier}`: {reason}")]
    MalformedIdentifier { identifier: String, reason: String },

    /// A connection was attempted without a connection string.
    #[error("missing connection string: a non-empty connection string is required to connect")]
    MissingConnectionString,

    /// The connector could not open (or close) a connection.
    #[error("connection error: {0}")]
    Connection(String),

    /// The backend rejected or failed to run a query.
    #[error("query error: {0}")]
    Query(String),

    /// The HTTP request could not be completed.
    #[error("http error: {0}")]
    Http(String),

    /// The backend answered with a body that could not be decoded.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl CheckError {
    pub(crate) fn malformed(identifier: &str, reason: impl Into<String>) -> Self {
        Self::MalformedIdentifier {
            identifier: identifier.to_string(),
            reason: reason.into(),
        }
    }
}
