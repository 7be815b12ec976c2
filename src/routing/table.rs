//! Ordered route table.

use log::debug;

use crate::parser::Method;
use crate::routing::error::Error;
use crate::routing::pattern::{Params, PathPattern};

/// A registered (methods, pattern) binding.
#[derive(Debug, Clone)]
pub struct Route<H> {
    pub pattern: PathPattern,
    pub methods: Vec<Method>,
    pub handler: H,
}

/// A route selected for a request together with its bound placeholders.
#[derive(Debug)]
pub struct RouteMatch<'a, H> {
    pub route: &'a Route<H>,
    pub params: Params,
}

/// Outcome of looking a request up in the table.
#[derive(Debug)]
pub enum Resolution<'a, H> {
    /// A route accepts both the path and the method.
    Matched(RouteMatch<'a, H>),
    /// At least one pattern accepts the path, none the method.
    MethodNotAllowed { allowed: Vec<Method> },
    /// No pattern accepts the path.
    NotFound,
}

/// Routes in registration order. The first route that accepts both the path
/// and the method wins.
#[derive(Debug, Clone)]
pub struct RouteTable<H> {
    routes: Vec<Route<H>>,
}

impl<H> Default for RouteTable<H> {
    fn default() -> Self {
        Self { routes: Vec::new() }
    }
}

impl<H> RouteTable<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route. Fails if the pattern is invalid, no method is given, or
    /// any of `methods` is already registered for a pattern of the same
    /// shape (same literals, placeholders in the same positions).
    pub fn register(&mut self, methods: &[Method], pattern: &str, handler: H) -> Result<(), Error> {
        if methods.is_empty() {
            return Err(Error::NoMethods(pattern.to_string()));
        }

        let pattern = PathPattern::parse(pattern)?;

        let mut unique: Vec<Method> = Vec::with_capacity(methods.len());
        for method in methods {
            if !unique.contains(method) {
                unique.push(*method);
            }
        }

        for existing in self.routes.iter().filter(|r| r.pattern.same_shape(&pattern)) {
            if let Some(method) = unique.iter().find(|m| existing.methods.contains(*m)) {
                return Err(Error::DuplicateRoute {
                    method: *method,
                    pattern: existing.pattern.to_string(),
                });
            }
        }

        debug!("Registered route {pattern} [{}]", join_methods(&unique));
        self.routes.push(Route {
            pattern,
            methods: unique,
            handler,
        });
        Ok(())
    }

    /// Find the route for `method` and `path`. Any query string is ignored.
    ///
    /// `method` is compared against method tokens, so unknown methods simply
    /// never match.
    pub fn resolve(&self, method: &str, path: &str) -> Resolution<'_, H> {
        let path = path.split_once('?').map_or(path, |(p, _)| p);

        let mut allowed: Vec<Method> = Vec::new();
        let mut path_matched = false;

        for route in &self.routes {
            let Some(params) = route.pattern.matches(path) else {
                continue;
            };

            if route.methods.iter().any(|m| m.as_str() == method) {
                return Resolution::Matched(RouteMatch { route, params });
            }

            path_matched = true;
            for m in &route.methods {
                if !allowed.contains(m) {
                    allowed.push(*m);
                }
            }
        }

        if path_matched {
            Resolution::MethodNotAllowed { allowed }
        } else {
            Resolution::NotFound
        }
    }

    pub fn routes(&self) -> &[Route<H>] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// `GET, POST` style method list, as used in `Allow` headers and logs.
pub(crate) fn join_methods(methods: &[Method]) -> String {
    methods
        .iter()
        .map(Method::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
