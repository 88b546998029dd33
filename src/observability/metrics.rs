//! Metrics collection and exposition.
//!
//! # Metrics
//! - `proxy_requests_total` (counter): inbound aggregation requests by status
//! - `proxy_request_duration_seconds` (histogram): inbound latency
//! - `upstream_calls_total` (counter): upstream calls by label and outcome
//! - `upstream_call_duration_seconds` (histogram): per-call latency by label
//!
//! # Design Decisions
//! - Recording is fire-and-forget; it can never fail a request
//! - Outcome labels are the classification classes, not raw status codes,
//!   to keep cardinality bounded

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::upstream::{MALFORMED_BODY_STATUS, NETWORK_FAILURE_STATUS};

/// Install the Prometheus exporter on its own listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one inbound aggregation request.
pub fn record_request(status: u16, start: Instant) {
    counter!("proxy_requests_total", "status" => status.to_string()).increment(1);
    histogram!("proxy_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

/// Record one upstream call outcome.
pub fn record_upstream_call(label: &str, status: u16, start: Instant) {
    let outcome = match status {
        200 => "success",
        401 => "unauthorized",
        NETWORK_FAILURE_STATUS => "network",
        MALFORMED_BODY_STATUS => "malformed",
        _ => "http_error",
    };

    counter!(
        "upstream_calls_total",
        "label" => label.to_string(),
        "outcome" => outcome
    )
    .increment(1);
    histogram!("upstream_call_duration_seconds", "label" => label.to_string())
        .record(start.elapsed().as_secs_f64());
}
