//! Shared utilities for integration testing.

use std::net::SocketAddr;

use axum::body::{to_bytes, Body};
use axum::http::{Request, Response};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower::ServiceExt;

use tiny_router::{HttpServer, Router};

/// Send one request through the router in-process.
#[allow(dead_code)]
pub async fn send(router: &Router, method: &str, uri: &str) -> Response<Body> {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    router.clone().oneshot(req).await.unwrap()
}

/// Collect a response body as a string.
#[allow(dead_code)]
pub async fn body_string(res: Response<Body>) -> String {
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// A server running on an ephemeral port. Dropping it stops the server.
#[allow(dead_code)]
pub struct TestServer {
    pub addr: SocketAddr,
    _stop: oneshot::Sender<()>,
}

/// Start an `HttpServer` for `router` on 127.0.0.1 with a random port.
#[allow(dead_code)]
pub async fn start_server(router: Router) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (stop, stopped) = oneshot::channel::<()>();

    tokio::spawn(async move {
        let shutdown = async move {
            let _ = stopped.await;
        };
        let _ = HttpServer::new(router).run_until(listener, shutdown).await;
    });

    TestServer { addr, _stop: stop }
}
