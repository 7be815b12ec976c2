//! HTTP/1.x wire parsing for the local server.
//!
//! The gateway itself works on already-decoded requests; this module is only
//! needed when requests arrive as raw bytes over a socket.

mod request;
mod method;
mod version;
mod error;

// Re-export public items
pub use request::HttpRequest;
pub use method::Method;
pub use version::HttpVersion;
pub use error::Error;

pub use request::{message_length, parse_request};
