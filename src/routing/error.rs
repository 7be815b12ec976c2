//! Errors raised while building a route table.

use thiserror::Error;

use crate::parser::Method;

/// Errors that can occur when registering a route.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The path pattern cannot be parsed.
    #[error("Invalid path pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// A route with the same method and pattern already exists.
    #[error("Duplicate route: {method} {pattern}")]
    DuplicateRoute { method: Method, pattern: String },

    /// The route was declared without any method.
    #[error("No methods given for route: {0}")]
    NoMethods(String),
}

impl Error {
    pub(crate) fn invalid(pattern: &str, reason: impl Into<String>) -> Self {
        Error::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.into(),
        }
    }
}
