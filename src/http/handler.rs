//! Request handlers.
//!
//! Any async function or closure taking a `Request<Body>` and returning
//! something that implements [`IntoResponse`] is a [`Handler`]:
//!
//! ```
//! use axum::{body::Body, http::Request};
//! use tiny_router::http::handler::BoxHandler;
//!
//! async fn home(_req: Request<Body>) -> &'static str {
//!     "home"
//! }
//!
//! let handler = BoxHandler::new(home);
//! ```

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use axum::{
    body::Body,
    http::Request,
    response::{IntoResponse, Response},
};
use futures_util::future::BoxFuture;

/// Future returned by every handler once type-erased.
pub type HandlerFuture = BoxFuture<'static, Response>;

/// Something that turns a request into a response.
pub trait Handler: Send + Sync + 'static {
    fn handle(&self, req: Request<Body>) -> HandlerFuture;
}

impl<F, Fut, R> Handler for F
where
    F: Fn(Request<Body>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse,
{
    fn handle(&self, req: Request<Body>) -> HandlerFuture {
        let fut = (self)(req);
        Box::pin(async move { fut.await.into_response() })
    }
}

/// A cheaply clonable, type-erased handler.
#[derive(Clone)]
pub struct BoxHandler(Arc<dyn Handler>);

impl BoxHandler {
    pub fn new<H: Handler>(handler: H) -> Self {
        Self(Arc::new(handler))
    }
}

impl Handler for BoxHandler {
    fn handle(&self, req: Request<Body>) -> HandlerFuture {
        self.0.handle(req)
    }
}

impl fmt::Debug for BoxHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BoxHandler")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_closure_handler() {
        let handler = BoxHandler::new(|_req: Request<Body>| async { (StatusCode::CREATED, "made") });
        let res = handler.handle(Request::new(Body::empty())).await;
        assert_eq!(res.status(), StatusCode::CREATED);

        let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"made");
    }

    #[tokio::test]
    async fn test_box_handler_is_a_handler() {
        let inner = BoxHandler::new(|_req: Request<Body>| async { "inner" });
        let outer = BoxHandler::new(inner.clone());
        let res = outer.handle(Request::new(Body::empty())).await;
        assert_eq!(res.status(), StatusCode::OK);
    }
}
