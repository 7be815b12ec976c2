//! In-process gateway: resolves requests against an app and builds responses.

use std::sync::Arc;

use log::{debug, error, warn};

use crate::gateway::app::App;
use crate::gateway::error::Error;
use crate::gateway::request::{CurrentRequest, Request};
use crate::gateway::response::Response;
use crate::parser::Method;
use crate::routing::Resolution;

/// Simulates the cloud front door for an [`App`] without any network.
///
/// Every call is independent: the route table is immutable and handlers get
/// nothing but their own request, so a gateway can be shared across threads.
#[derive(Debug, Clone)]
pub struct LocalGateway {
    app: Arc<App>,
}

impl LocalGateway {
    pub fn new(app: App) -> Self {
        Self { app: Arc::new(app) }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    /// Handle a request given as its parts.
    pub fn handle_request<I, K, V>(&self, method: &str, path: &str, headers: I, body: &str) -> Response
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let request = Request {
            method: method.to_string(),
            path: path.to_string(),
            headers: headers.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            body: body.to_string(),
        };
        self.handle(&request)
    }

    /// Handle a request. Failures come back as error responses, never panics
    /// or `Err`s.
    pub fn handle(&self, request: &Request) -> Response {
        let response = match self.dispatch(request) {
            Ok(response) => response,
            Err(e) => {
                if e.status().as_u16() >= 500 {
                    error!("{} {} failed: {e}", request.method, request.path);
                } else {
                    warn!("{} {} rejected: {e}", request.method, request.path);
                }
                e.to_response()
            }
        };

        debug!(
            "{} {} -> {}",
            request.method, request.path, response.status_code
        );
        response
    }

    /// Resolve and run the handler, propagating any request error.
    pub fn dispatch(&self, request: &Request) -> Result<Response, Error> {
        let route_match = match self.app.routes().resolve(&request.method, &request.path) {
            Resolution::Matched(m) => m,
            Resolution::MethodNotAllowed { allowed } => {
                return Err(Error::MethodNotAllowed {
                    method: request.method.clone(),
                    allowed,
                });
            }
            Resolution::NotFound => {
                return Err(Error::RouteNotFound(request.route_path().to_string()));
            }
        };

        let endpoint = &route_match.route.handler;
        let content_type = request.content_type();
        if !endpoint.accepts(&content_type) {
            return Err(Error::UnsupportedMediaType(content_type));
        }

        // Resolution only succeeds for registered methods, which always parse.
        let method: Method = request
            .method
            .parse()
            .map_err(|_| Error::Internal(format!("unroutable method {}", request.method)))?;

        let current = CurrentRequest::new(method, route_match.params, request);
        let reply = (endpoint.handler)(&current)?;
        reply.into_response()
    }
}
