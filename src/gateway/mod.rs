//! Local request/response gateway.
//!
//! [`LocalGateway`] plays the role of the hosted API front door: it matches a
//! request against an [`App`]'s routes, runs the handler and wraps the result
//! in a [`Response`] envelope.

mod app;
mod error;
mod local;
mod request;
mod response;
mod tests;

pub use app::{App, Endpoint, HandlerFn, HandlerResult};
pub use error::Error;
pub use local::LocalGateway;
pub use request::{CurrentRequest, Request, DEFAULT_CONTENT_TYPE};
pub use response::{Reply, Response, StatusCode};
