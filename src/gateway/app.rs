//! Application: a named set of route declarations.

use std::fmt;
use std::sync::Arc;

use crate::gateway::error::Error;
use crate::gateway::request::{CurrentRequest, DEFAULT_CONTENT_TYPE};
use crate::gateway::response::Reply;
use crate::parser::Method;
use crate::routing::{self, RouteTable};

/// Type alias for the result a handler returns.
pub type HandlerResult = Result<Reply, Error>;

/// Type alias for a shared, type-erased handler function.
pub type HandlerFn = Arc<dyn Fn(&CurrentRequest<'_>) -> HandlerResult + Send + Sync>;

/// What a route dispatches to: the handler plus the content types it accepts.
#[derive(Clone)]
pub struct Endpoint {
    pub handler: HandlerFn,
    pub content_types: Vec<String>,
}

impl Endpoint {
    /// Whether a request with media type `content_type` may reach this handler.
    pub fn accepts(&self, content_type: &str) -> bool {
        self.content_types.iter().any(|c| c.eq_ignore_ascii_case(content_type))
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("content_types", &self.content_types)
            .finish_non_exhaustive()
    }
}

/// An application: routes registered up front, then handed to a gateway.
#[derive(Debug)]
pub struct App {
    name: String,
    routes: RouteTable<Endpoint>,
}

impl App {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            routes: RouteTable::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register `handler` for `methods` on `pattern`, accepting JSON bodies.
    pub fn route<F>(&mut self, pattern: &str, methods: &[Method], handler: F) -> Result<&mut Self, routing::Error>
    where
        F: Fn(&CurrentRequest<'_>) -> HandlerResult + Send + Sync + 'static,
    {
        self.route_accepting(pattern, methods, &[DEFAULT_CONTENT_TYPE], handler)
    }

    /// Like [`App::route`], with an explicit list of accepted content types.
    pub fn route_accepting<F>(
        &mut self,
        pattern: &str,
        methods: &[Method],
        content_types: &[&str],
        handler: F,
    ) -> Result<&mut Self, routing::Error>
    where
        F: Fn(&CurrentRequest<'_>) -> HandlerResult + Send + Sync + 'static,
    {
        let endpoint = Endpoint {
            handler: Arc::new(handler),
            content_types: content_types.iter().map(|c| c.to_ascii_lowercase()).collect(),
        };
        self.routes.register(methods, pattern, endpoint)?;
        Ok(self)
    }

    pub fn routes(&self) -> &RouteTable<Endpoint> {
        &self.routes
    }
}
