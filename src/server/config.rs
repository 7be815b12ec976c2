//! Server configuration.

use std::net::{Ipv4Addr, SocketAddr};

/// Port the local server listens on unless told otherwise.
pub const DEFAULT_PORT: u16 = 8000;

/// Local server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// The address to bind to.
    pub addr: SocketAddr,
    /// Connections served at once; further ones get a 503.
    pub max_connections: usize,
    /// Largest request, head and body together, that will be read.
    pub read_buffer_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_PORT)),
            max_connections: 1024,
            read_buffer_size: 8192,
        }
    }
}
