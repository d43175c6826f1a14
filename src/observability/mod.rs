//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Router and middleware produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (dispatch counters, route gauge)
//!
//! Consumers:
//!     → stdout
//!     → Metrics endpoint (Prometheus scrape)
//! ```

pub mod logging;
pub mod metrics;
