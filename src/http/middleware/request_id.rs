//! Request ID middleware.
//!
//! Reuses an incoming `x-request-id` header or generates a UUID v4, exposes it
//! to handlers through the request extensions and echoes it on the response.

use axum::{
    body::Body,
    http::{HeaderValue, Request},
};
use uuid::Uuid;

use crate::http::middleware::{from_fn, Middleware, Next};

pub const X_REQUEST_ID: &str = "x-request-id";

/// The ID assigned to the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

/// Read the request ID set by [`request_id`].
pub trait RequestIdExt {
    fn request_id(&self) -> Option<&str>;
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> Option<&str> {
        self.extensions().get::<RequestId>().map(|id| id.0.as_str())
    }
}

pub fn request_id() -> impl Middleware {
    from_fn(|mut req: Request<Body>, next: Next| async move {
        let id = req
            .headers()
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(str::to_owned)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        req.extensions_mut().insert(RequestId(id.clone()));
        let mut res = next.run(req).await;

        if let Ok(value) = HeaderValue::from_str(&id) {
            res.headers_mut().insert(X_REQUEST_ID, value);
        }
        res
    })
}
