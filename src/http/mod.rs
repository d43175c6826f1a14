//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, tracing layer)
//!     → routing::Router (fallback service)
//!     → middleware/ (request id, access log, user middleware)
//!     → handler.rs (user handler)
//!     → response.rs (404 / 405 / 303 when no handler runs)
//! ```

pub mod handler;
pub mod middleware;
pub mod response;
pub mod server;

pub use handler::{BoxHandler, Handler, HandlerFuture};
pub use middleware::{compose, from_fn, Compose, Middleware, Next, SharedMiddleware};
pub use server::HttpServer;
