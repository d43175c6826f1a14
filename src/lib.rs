//! Tiny embeddable HTTP request router.
//!
//! Patterns are made of literals, `:name` single-segment captures and
//! `*name` catch-all captures. Routes are matched in registration order,
//! method mismatches produce a 405 with an `Allow` header, and trailing-slash
//! mismatches can optionally be redirected.
//!
//! ```
//! use axum::{body::Body, http::Request};
//! use tiny_router::{RequestParamsExt, RouteTable, RouterConfig};
//!
//! let mut table = RouteTable::new();
//! table
//!     .get("/articles/:id", |req: Request<Body>| async move {
//!         format!("article {}", req.param("id"))
//!     })
//!     .unwrap();
//!
//! let router = table.into_router(RouterConfig::default());
//! assert_eq!(router.routes().len(), 1);
//! ```

pub mod config;
pub mod http;
pub mod observability;
pub mod routing;

pub use config::{AppConfig, RouterConfig};
pub use http::{compose, from_fn, BoxHandler, Handler, HttpServer, Middleware, Next};
pub use routing::{Params, Pattern, PatternError, RequestParamsExt, RouteError, RouteTable, Router};
