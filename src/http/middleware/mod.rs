//! Middleware composition.
//!
//! # Data Flow
//! ```text
//! compose([A, B]).wrap(H)
//!     → A pre → B pre → H → B post → A post
//! ```
//!
//! # Design Decisions
//! - A middleware maps a handler to a new handler; nothing runs at wrap time
//! - First declared middleware is the outermost wrapper
//! - Composition never mutates its inputs

pub mod access_log;
pub mod request_id;

use std::future::Future;
use std::sync::Arc;

use axum::{
    body::Body,
    http::Request,
    response::{IntoResponse, Response},
};

use crate::http::handler::{BoxHandler, Handler};

pub use access_log::access_log;
pub use request_id::{request_id, RequestId, RequestIdExt, X_REQUEST_ID};

/// Decorates a handler.
pub trait Middleware: Send + Sync + 'static {
    fn wrap(&self, next: BoxHandler) -> BoxHandler;
}

impl<F> Middleware for F
where
    F: Fn(BoxHandler) -> BoxHandler + Send + Sync + 'static,
{
    fn wrap(&self, next: BoxHandler) -> BoxHandler {
        (self)(next)
    }
}

/// Type-erased middleware, used to mix different middleware types in one list.
pub type SharedMiddleware = Arc<dyn Middleware>;

/// An ordered stack of middleware acting as a single middleware.
#[derive(Clone, Default)]
pub struct Compose {
    layers: Vec<SharedMiddleware>,
}

impl Compose {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a middleware. It runs inside every middleware added before it.
    pub fn with<M: Middleware>(mut self, middleware: M) -> Self {
        self.layers.push(Arc::new(middleware));
        self
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl Middleware for Compose {
    fn wrap(&self, next: BoxHandler) -> BoxHandler {
        self.layers
            .iter()
            .rev()
            .fold(next, |handler, layer| layer.wrap(handler))
    }
}

/// Compose middleware so the first one listed runs outermost.
pub fn compose<I>(layers: I) -> Compose
where
    I: IntoIterator<Item = SharedMiddleware>,
{
    Compose {
        layers: layers.into_iter().collect(),
    }
}

/// The rest of the chain, handed to a [`from_fn`] middleware.
pub struct Next {
    inner: BoxHandler,
}

impl Next {
    /// Run the wrapped handler.
    pub async fn run(self, req: Request<Body>) -> Response {
        self.inner.handle(req).await
    }
}

/// Middleware built from an async function.
pub struct FromFn<F> {
    f: Arc<F>,
}

impl<F> Clone for FromFn<F> {
    fn clone(&self) -> Self {
        Self { f: self.f.clone() }
    }
}

/// Build a middleware from `async fn(Request<Body>, Next) -> impl IntoResponse`.
///
/// ```
/// use axum::{body::Body, http::Request};
/// use tiny_router::http::middleware::{from_fn, Next};
///
/// let mw = from_fn(|req: Request<Body>, next: Next| async move {
///     tracing::debug!(path = %req.uri().path(), "before");
///     next.run(req).await
/// });
/// ```
pub fn from_fn<F, Fut, R>(f: F) -> FromFn<F>
where
    F: Fn(Request<Body>, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse,
{
    FromFn { f: Arc::new(f) }
}

impl<F, Fut, R> Middleware for FromFn<F>
where
    F: Fn(Request<Body>, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse,
{
    fn wrap(&self, next: BoxHandler) -> BoxHandler {
        let f = self.f.clone();
        BoxHandler::new(move |req: Request<Body>| {
            let fut = f(req, Next { inner: next.clone() });
            async move { fut.await.into_response() }
        })
    }
}
