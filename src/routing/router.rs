//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store the frozen route table
//! - Resolve a request to a route, a redirect, a 405 or a 404
//! - Attach captured parameters to the request and run the handler
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) scan in registration order; first full match wins
//! - A method mismatch keeps scanning so `Allow` lists every candidate
//! - Parameters travel in the request extensions, never in shared state

use std::convert::Infallible;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::{
    body::Body,
    http::{Method, Request},
    response::Response,
};
use futures_util::future::BoxFuture;
use tower::Service;

use crate::config::RouterConfig;
use crate::http::handler::{Handler, HandlerFuture};
use crate::http::response;
use crate::observability::metrics;
use crate::routing::matcher::{match_path, PathMatch};
use crate::routing::params::Params;
use crate::routing::path::{encode_path, RequestPath};
use crate::routing::table::Route;

/// Outcome of resolving one request.
#[derive(Debug)]
pub enum Resolution<'a> {
    NotFound,
    MethodNotAllowed { allowed: Vec<Method> },
    Redirect { location: String },
    Dispatch { route: &'a Route, params: Params },
}

impl Resolution<'_> {
    /// Label used in logs and metrics.
    pub fn outcome(&self) -> &'static str {
        match self {
            Resolution::NotFound => "not_found",
            Resolution::MethodNotAllowed { .. } => "method_not_allowed",
            Resolution::Redirect { .. } => "redirect",
            Resolution::Dispatch { .. } => "dispatch",
        }
    }
}

/// A frozen, shareable router.
///
/// Built with [`RouteTable::into_router`](crate::routing::RouteTable::into_router).
/// Cloning is cheap.
#[derive(Clone)]
pub struct Router {
    inner: Arc<Inner>,
}

struct Inner {
    routes: Vec<Route>,
    config: RouterConfig,
}

impl Router {
    pub(crate) fn new(routes: Vec<Route>, config: RouterConfig) -> Self {
        tracing::info!(
            routes = routes.len(),
            redirect_trailing_slash = config.redirect_trailing_slash,
            "Router built"
        );
        metrics::record_routes_registered(routes.len());

        Self {
            inner: Arc::new(Inner { routes, config }),
        }
    }

    pub fn routes(&self) -> &[Route] {
        &self.inner.routes
    }

    pub fn config(&self) -> &RouterConfig {
        &self.inner.config
    }

    /// Decide what to do with a `method` request for `path`.
    ///
    /// `path` is the raw request path; it is decoded and cleaned here.
    pub fn resolve(&self, method: &Method, path: &str) -> Resolution<'_> {
        let path = RequestPath::new(path);
        let mut allowed: Vec<Method> = Vec::new();

        for route in &self.inner.routes {
            let matched = match_path(route.pattern(), &path);
            if !matched.is_structural() {
                continue;
            }

            if route.method() != method {
                if !allowed.contains(route.method()) {
                    allowed.push(route.method().clone());
                }
                continue;
            }

            match matched {
                PathMatch::Matched(params) => return Resolution::Dispatch { route, params },
                PathMatch::TrailingSlash { redirect_to } if self.inner.config.redirect_trailing_slash => {
                    return Resolution::Redirect {
                        location: encode_path(&redirect_to),
                    };
                }
                _ => {}
            }
        }

        if allowed.is_empty() {
            Resolution::NotFound
        } else {
            Resolution::MethodNotAllowed { allowed }
        }
    }

    /// Handle one request.
    pub fn serve(&self, mut req: Request<Body>) -> HandlerFuture {
        let method = req.method().clone();
        let resolution = self.resolve(&method, req.uri().path());
        metrics::record_dispatch(resolution.outcome());

        match resolution {
            Resolution::Dispatch { route, params } => {
                tracing::debug!(
                    method = %method,
                    path = %req.uri().path(),
                    pattern = %route.pattern(),
                    params = params.len(),
                    "Route matched"
                );
                let handler = route.handler().clone();
                req.extensions_mut().insert(params);
                handler.handle(req)
            }
            Resolution::Redirect { location } => {
                let location = match req.uri().query() {
                    Some(query) => format!("{}?{}", location, query),
                    None => location,
                };
                tracing::debug!(path = %req.uri().path(), location = %location, "Redirecting trailing slash");
                ready(response::see_other(&location))
            }
            Resolution::MethodNotAllowed { allowed } => {
                tracing::debug!(method = %method, path = %req.uri().path(), allowed = ?allowed, "Method not allowed");
                ready(response::method_not_allowed(&allowed))
            }
            Resolution::NotFound => {
                tracing::debug!(method = %method, path = %req.uri().path(), "No route matched");
                ready(response::not_found())
            }
        }
    }
}

fn ready(res: Response) -> HandlerFuture {
    Box::pin(std::future::ready(res))
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.inner.routes)
            .field("config", &self.inner.config)
            .finish()
    }
}

impl Service<Request<Body>> for Router {
    type Response = Response;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Response, Infallible>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let fut = self.serve(req);
        Box::pin(async move { Ok(fut.await) })
    }
}
