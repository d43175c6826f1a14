//! Metrics collection and exposition.
//!
//! # Metrics
//! - `router_dispatch_total` (counter): requests by `outcome`
//!   (dispatch, redirect, method_not_allowed, not_found)
//! - `router_routes` (gauge): routes in the most recently built router
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; without an installed recorder
//!   the calls are no-ops
//! - Prometheus exporter is opt-in

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

pub fn record_dispatch(outcome: &'static str) {
    metrics::counter!("router_dispatch_total", "outcome" => outcome).increment(1);
}

pub fn record_routes_registered(count: usize) {
    metrics::gauge!("router_routes").set(count as f64);
}

/// Install the Prometheus recorder and its HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}
