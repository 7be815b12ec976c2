//! Request-scoped errors and their response bodies.

use serde::Serialize;
use thiserror::Error;

use crate::gateway::response::{Response, StatusCode};
use crate::parser::Method;
use crate::routing::join_methods;

/// Errors a single request can end in.
///
/// None of these are fatal to the gateway; each is turned into a status-coded
/// response with a `{"Code": ..., "Message": ...}` body.
#[derive(Debug, Error)]
pub enum Error {
    /// No route pattern matches the path.
    #[error("No route matches path: {0}")]
    RouteNotFound(String),

    /// A pattern matches the path but not the method.
    #[error("Unsupported method: {method}")]
    MethodNotAllowed { method: String, allowed: Vec<Method> },

    /// The body was declared as JSON but does not parse.
    #[error("Error Parsing JSON: {0}")]
    BodyParse(#[source] serde_json::Error),

    /// The request content type is not accepted by the route.
    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// Raised by handlers for invalid input.
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    /// Raised by handlers when the addressed resource does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A handler asked for a placeholder its route does not declare.
    #[error("Unknown path parameter: {0}")]
    MissingParam(String),

    /// The handler's value could not be serialized.
    #[error("Error serializing response: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("{0}")]
    Internal(String),

    /// The server cannot take the request right now.
    #[error("{0}")]
    Unavailable(String),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    #[serde(rename = "Code")]
    code: &'a str,
    #[serde(rename = "Message")]
    message: String,
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::RouteNotFound(_) | Error::NotFound(_) => StatusCode::NotFound,
            Error::MethodNotAllowed { .. } => StatusCode::MethodNotAllowed,
            Error::BodyParse(_) | Error::BadRequest(_) => StatusCode::BadRequest,
            Error::UnsupportedMediaType(_) => StatusCode::UnsupportedMediaType,
            Error::Unauthorized(_) => StatusCode::Unauthorized,
            Error::Forbidden(_) => StatusCode::Forbidden,
            Error::MissingParam(_) | Error::Serialize(_) | Error::Internal(_) => {
                StatusCode::InternalServerError
            }
            Error::Unavailable(_) => StatusCode::ServiceUnavailable,
        }
    }

    /// Error name used in the `Code` field of the body.
    pub fn code(&self) -> &'static str {
        match self.status() {
            StatusCode::NotFound => "NotFoundError",
            StatusCode::MethodNotAllowed => "MethodNotAllowedError",
            StatusCode::BadRequest => "BadRequestError",
            StatusCode::UnsupportedMediaType => "UnsupportedMediaType",
            StatusCode::Unauthorized => "UnauthorizedError",
            StatusCode::Forbidden => "ForbiddenError",
            StatusCode::ServiceUnavailable => "ServiceUnavailableError",
            _ => "InternalServerError",
        }
    }

    /// Server-side failures are not described to the caller.
    fn public_message(&self) -> String {
        match self.status() {
            StatusCode::InternalServerError => "An internal server error occurred.".to_string(),
            _ => self.to_string(),
        }
    }

    pub fn to_response(&self) -> Response {
        let body = ErrorBody {
            code: self.code(),
            message: self.public_message(),
        };
        // A struct of two strings always serializes.
        let json = serde_json::to_string(&body).unwrap_or_default();

        let response = Response::new(self.status())
            .with_content_type("application/json")
            .with_body(json);

        match self {
            Error::MethodNotAllowed { allowed, .. } => {
                response.with_header("Allow", join_methods(allowed))
            }
            _ => response,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::BodyParse(err)
    }
}
