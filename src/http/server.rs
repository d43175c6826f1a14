//! HTTP server setup.
//!
//! # Responsibilities
//! - Mount the router as the service behind an Axum app
//! - Wire up tower middleware (tracing)
//! - Bind to a listener and serve until shutdown
//!
//! The router itself has no notion of connections; this is only a harness
//! for running it.

use std::future::Future;

use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::routing::Router;

/// HTTP server driving a [`Router`].
pub struct HttpServer {
    app: axum::Router,
    router: Router,
}

impl HttpServer {
    pub fn new(router: Router) -> Self {
        let app = Self::build_app(router.clone());
        Self { app, router }
    }

    fn build_app(router: Router) -> axum::Router {
        axum::Router::new()
            .fallback_service(router)
            .layer(TraceLayer::new_for_http())
    }

    /// Serve on `listener` until Ctrl+C.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        self.run_until(listener, shutdown_signal()).await
    }

    /// Serve on `listener` until `shutdown` completes.
    pub async fn run_until<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.router.routes().len(),
            "HTTP server starting"
        );

        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    pub fn router(&self) -> &Router {
        &self.router
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    }
}
