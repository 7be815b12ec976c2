//! Error types for the local server.

use thiserror::Error;

use crate::parser::Error as ParserError;

/// Errors that end a connection.
///
/// Request-level failures (unknown route, bad JSON, ...) are answered by the
/// gateway and never show up here.
#[derive(Debug, Error)]
pub enum Error {
    /// The bytes received are not an HTTP request.
    #[error("Parse error: {0}")]
    ParseError(#[from] ParserError),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
