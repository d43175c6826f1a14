//! One structured log line per handled request.

use std::time::Instant;

use axum::{body::Body, http::Request};

use crate::http::middleware::{from_fn, Middleware, Next, RequestIdExt};

pub fn access_log() -> impl Middleware {
    from_fn(|req: Request<Body>, next: Next| async move {
        let start = Instant::now();
        let method = req.method().clone();
        let path = req.uri().path().to_string();
        let request_id = req.request_id().unwrap_or("-").to_string();

        let res = next.run(req).await;

        tracing::info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = res.status().as_u16(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "Request handled"
        );
        res
    })
}
