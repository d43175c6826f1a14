//! Route registration.
//!
//! # Responsibilities
//! - Validate method, pattern and uniqueness at registration time
//! - Keep routes in registration order
//! - Mount groups of routes under a prefix
//!
//! # Design Decisions
//! - Fail fast: any bad registration is an `Err`, nothing is skipped or fixed
//! - Groups are flattened when registered; no prefix is kept around
//! - A table is frozen into a [`Router`] before it serves traffic

use std::fmt;

use axum::http::Method;
use thiserror::Error;

use crate::config::RouterConfig;
use crate::http::handler::{BoxHandler, Handler};
use crate::routing::pattern::{Pattern, PatternError};
use crate::routing::router::Router;

/// HTTP verbs accepted at registration.
pub const METHODS: [Method; 9] = [
    Method::GET,
    Method::HEAD,
    Method::POST,
    Method::PUT,
    Method::PATCH,
    Method::DELETE,
    Method::CONNECT,
    Method::OPTIONS,
    Method::TRACE,
];

/// Registration failures.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] PatternError),

    #[error("invalid registration: {0}")]
    InvalidRegistration(String),

    #[error("route {method} {pattern} is already registered")]
    DuplicateRoute { method: Method, pattern: String },
}

/// A registered route.
#[derive(Clone)]
pub struct Route {
    method: Method,
    pattern: Pattern,
    handler: BoxHandler,
}

impl Route {
    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn handler(&self) -> &BoxHandler {
        &self.handler
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("pattern", &self.pattern.as_str())
            .finish()
    }
}

/// Ordered collection of routes under construction.
///
/// When two patterns overlap, the route registered first wins.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `method` requests matching `pattern`.
    ///
    /// The method is case-insensitive and must be a standard HTTP verb.
    pub fn handle<H: Handler>(
        &mut self,
        method: &str,
        pattern: &str,
        handler: H,
    ) -> Result<&mut Self, RouteError> {
        let method = parse_method(method)?;
        let pattern = Pattern::parse(pattern)?;
        self.insert(method, pattern, BoxHandler::new(handler))?;
        Ok(self)
    }

    pub fn get<H: Handler>(&mut self, pattern: &str, handler: H) -> Result<&mut Self, RouteError> {
        self.verb(Method::GET, pattern, handler)
    }

    pub fn head<H: Handler>(&mut self, pattern: &str, handler: H) -> Result<&mut Self, RouteError> {
        self.verb(Method::HEAD, pattern, handler)
    }

    pub fn post<H: Handler>(&mut self, pattern: &str, handler: H) -> Result<&mut Self, RouteError> {
        self.verb(Method::POST, pattern, handler)
    }

    pub fn put<H: Handler>(&mut self, pattern: &str, handler: H) -> Result<&mut Self, RouteError> {
        self.verb(Method::PUT, pattern, handler)
    }

    pub fn patch<H: Handler>(&mut self, pattern: &str, handler: H) -> Result<&mut Self, RouteError> {
        self.verb(Method::PATCH, pattern, handler)
    }

    pub fn delete<H: Handler>(&mut self, pattern: &str, handler: H) -> Result<&mut Self, RouteError> {
        self.verb(Method::DELETE, pattern, handler)
    }

    pub fn options<H: Handler>(&mut self, pattern: &str, handler: H) -> Result<&mut Self, RouteError> {
        self.verb(Method::OPTIONS, pattern, handler)
    }

    fn verb<H: Handler>(
        &mut self,
        method: Method,
        pattern: &str,
        handler: H,
    ) -> Result<&mut Self, RouteError> {
        let pattern = Pattern::parse(pattern)?;
        self.insert(method, pattern, BoxHandler::new(handler))?;
        Ok(self)
    }

    /// Register every route added by `f` under `prefix`.
    ///
    /// ```
    /// use axum::{body::Body, http::Request};
    /// use tiny_router::routing::RouteTable;
    ///
    /// let mut table = RouteTable::new();
    /// table
    ///     .group("/api/", |api| {
    ///         api.post("user/:id", |_req: Request<Body>| async { "created" })?;
    ///         Ok(())
    ///     })
    ///     .unwrap();
    ///
    /// assert_eq!(table.routes()[0].pattern().as_str(), "/api/user/:id");
    /// ```
    pub fn group<F>(&mut self, prefix: &str, f: F) -> Result<&mut Self, RouteError>
    where
        F: FnOnce(&mut RouteTable) -> Result<(), RouteError>,
    {
        let prefix = Pattern::parse(prefix)?;
        let mut child = RouteTable::new();
        f(&mut child)?;

        let mark = self.routes.len();
        for route in child.routes {
            let registered = Pattern::join(&prefix, &route.pattern)
                .map_err(RouteError::from)
                .and_then(|pattern| self.insert(route.method, pattern, route.handler));

            if let Err(err) = registered {
                self.routes.truncate(mark);
                return Err(err);
            }
        }
        Ok(self)
    }

    fn insert(&mut self, method: Method, pattern: Pattern, handler: BoxHandler) -> Result<(), RouteError> {
        if self
            .routes
            .iter()
            .any(|r| r.method == method && r.pattern.as_str() == pattern.as_str())
        {
            return Err(RouteError::DuplicateRoute {
                method,
                pattern: pattern.as_str().to_string(),
            });
        }

        tracing::debug!(method = %method, pattern = %pattern, "Route registered");
        self.routes.push(Route {
            method,
            pattern,
            handler,
        });
        Ok(())
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Freeze the table. No routes can be added afterwards.
    pub fn into_router(self, config: RouterConfig) -> Router {
        Router::new(self.routes, config)
    }
}

fn parse_method(raw: &str) -> Result<Method, RouteError> {
    let token = raw.trim().to_ascii_uppercase();
    if token.is_empty() {
        return Err(RouteError::InvalidRegistration("missing HTTP method".to_string()));
    }

    METHODS
        .iter()
        .find(|m| m.as_str() == token)
        .cloned()
        .ok_or_else(|| RouteError::InvalidRegistration(format!("unsupported HTTP method {:?}", raw)))
}
