//! TCP front end that serves a [`LocalGateway`](crate::gateway::LocalGateway)
//! for manual testing.

mod config;
mod error;
mod http_server;

// Re-export public items
pub use config::ServerConfig;
pub use error::Error;
pub use http_server::LocalServer;
