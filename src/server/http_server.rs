//! Accept loop for the local server.

use std::net::SocketAddr;
use std::sync::Arc;

use log::{error, info, warn};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::signal;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;

use crate::gateway::{Error as GatewayError, LocalGateway, Request};
use crate::parser::{message_length, parse_request};
use crate::routing::join_methods;
use crate::server::config::ServerConfig;
use crate::server::error::Error;

/// Serves a gateway over HTTP/1.1, one request per connection.
pub struct LocalServer {
    /// The server configuration.
    pub config: ServerConfig,
    /// The gateway every request is dispatched through.
    pub gateway: Arc<LocalGateway>,
}

impl LocalServer {
    pub fn new(config: ServerConfig, gateway: LocalGateway) -> Self {
        Self {
            config,
            gateway: Arc::new(gateway),
        }
    }

    /// Log the app name and its routes.
    fn display_server_info(&self) {
        let app = self.gateway.app();
        info!("Serving app {name:?}", name = app.name());
        info!("Registered endpoints:");
        for route in app.routes().routes() {
            info!("  {methods} {pattern}", methods = join_methods(&route.methods), pattern = route.pattern);
        }
    }

    async fn setup_listener(&self) -> Result<TcpListener, Error> {
        let listener = TcpListener::bind(&self.config.addr).await?;
        info!("Server listening on http://{addr}", addr = self.config.addr);
        Ok(listener)
    }

    /// Set up a Ctrl+C handler for graceful shutdown.
    fn setup_ctrl_c_handler(shutdown_tx: mpsc::Sender<()>, tasks: &mut JoinSet<()>) {
        tasks.spawn(async move {
            match signal::ctrl_c().await {
                Ok(()) => {
                    info!("Received Ctrl+C, initiating graceful shutdown");
                    let _ = shutdown_tx.send(()).await;
                }
                Err(e) => {
                    error!("Error setting up Ctrl+C handler: {e}");
                }
            }
        });
    }

    async fn handle_new_connection(
        mut socket: TcpStream,
        addr: SocketAddr,
        semaphore: Arc<Semaphore>,
        gateway: Arc<LocalGateway>,
        read_buffer_size: usize,
        tasks: &mut JoinSet<()>,
    ) {
        let permit = match semaphore.try_acquire_owned() {
            Ok(permit) => permit,
            Err(_) => {
                warn!("Connection limit reached, rejecting connection from {addr}");
                let response = GatewayError::Unavailable(
                    "Server is at capacity, please try again later".to_string(),
                )
                .to_response();
                let _ = socket.write_all(&response.to_bytes()).await;
                return;
            }
        };

        tasks.spawn(async move {
            // Released when the connection is done.
            let _permit = permit;

            if let Err(e) = Self::handle_connection(&mut socket, &gateway, read_buffer_size).await {
                error!("Error handling connection from {addr}: {e}");
            }
        });
    }

    /// Wait for in-flight connections, at most 30 seconds.
    async fn perform_shutdown(tasks: &mut JoinSet<()>) {
        info!("Waiting for {len} active connections to complete...", len = tasks.len());
        let shutdown_timeout = tokio::time::Duration::from_secs(30);
        let _ = tokio::time::timeout(shutdown_timeout, async {
            while let Some(res) = tasks.join_next().await {
                if let Err(e) = res {
                    error!("Task failed during shutdown: {e}");
                }
            }
        })
        .await;

        info!("Server shutdown complete");
    }

    /// Start the server and serve until Ctrl+C.
    pub async fn start(&self) -> Result<(), Error> {
        self.display_server_info();

        let listener = self.setup_listener().await?;
        let semaphore = Arc::new(Semaphore::new(self.config.max_connections));

        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
        let mut tasks = JoinSet::new();
        Self::setup_ctrl_c_handler(shutdown_tx, &mut tasks);

        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    info!("Shutting down server...");
                    break;
                }

                Some(res) = tasks.join_next(), if !tasks.is_empty() => {
                    if let Err(e) = res {
                        error!("Connection task failed: {e}");
                    }
                }

                accept_result = listener.accept() => {
                    match accept_result {
                        Ok((socket, addr)) => {
                            Self::handle_new_connection(
                                socket,
                                addr,
                                semaphore.clone(),
                                self.gateway.clone(),
                                self.config.read_buffer_size,
                                &mut tasks,
                            ).await;
                        }
                        Err(e) => {
                            error!("Error accepting connection: {e}");
                            tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
                        }
                    }
                }
            }
        }

        Self::perform_shutdown(&mut tasks).await;

        Ok(())
    }

    /// Read until the whole message has arrived, the peer stops sending, or
    /// `limit` bytes have been read.
    async fn read_message(
        socket: &mut (impl AsyncRead + Unpin),
        limit: usize,
    ) -> Result<Vec<u8>, Error> {
        let mut buf = Vec::new();
        let mut chunk = vec![0; limit.max(1)];

        while buf.len() < limit {
            let want = chunk.len().min(limit - buf.len());
            let n = socket.read(&mut chunk[..want]).await?;
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            if message_length(&buf).is_some_and(|len| buf.len() >= len) {
                break;
            }
        }

        Ok(buf)
    }

    /// Serve a single request on `socket`.
    ///
    /// Requests that cannot be parsed get a 400 and an `Err`; everything
    /// else is answered by the gateway.
    pub async fn handle_connection(
        socket: &mut (impl AsyncRead + AsyncWrite + Unpin),
        gateway: &LocalGateway,
        read_buffer_size: usize,
    ) -> Result<(), Error> {
        let buf = Self::read_message(socket, read_buffer_size).await?;
        if buf.is_empty() {
            return Ok(()); // Connection closed
        }

        let parsed = parse_request(&buf).and_then(|raw| {
            let body = raw.body_text()?.to_string();
            Ok(Request {
                method: raw.method.to_string(),
                path: raw.path,
                headers: raw.headers.into_iter().collect(),
                body,
            })
        });

        let request = match parsed {
            Ok(request) => request,
            Err(e) => {
                let response = GatewayError::BadRequest(format!("Error parsing request: {e}"))
                    .to_response();
                socket.write_all(&response.to_bytes()).await?;
                return Err(Error::ParseError(e));
            }
        };

        let response = gateway.handle(&request);
        socket.write_all(&response.to_bytes()).await?;
        socket.flush().await?;

        Ok(())
    }
}
