//! Metrics collection and exposition.
//!
//! # Metrics
//! - `security_txt_served_total` (counter): documents served, by interceptor and cache mode
//! - `security_txt_generated_total` (counter): document renderings, by interceptor
//! - `gateway_upstream_requests_total` (counter): forwarded requests, by status

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::config::CacheMode;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_served(interceptor: &str, mode: CacheMode) {
    ::metrics::counter!(
        "security_txt_served_total",
        "interceptor" => interceptor.to_string(),
        "cache_mode" => mode.as_str()
    )
    .increment(1);
}

pub fn record_generated(interceptor: &str) {
    ::metrics::counter!(
        "security_txt_generated_total",
        "interceptor" => interceptor.to_string()
    )
    .increment(1);
}

pub fn record_upstream(status: u16) {
    ::metrics::counter!(
        "gateway_upstream_requests_total",
        "status" => status.to_string()
    )
    .increment(1);
}
