//! Prometheus metrics for the gateway.
//!
//! Tracks:
//! - Inbound request counts per route
//! - Rejected (unauthorized) requests
//! - Upstream fetch failures
//! - Upstream fetch latency

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use tracing::debug;

// === Metric Name Constants ===

/// Inbound requests counter metric name.
pub const METRIC_REQUESTS: &str = "gateway_requests_total";
/// Unauthorized rejections counter metric name.
pub const METRIC_UNAUTHORIZED: &str = "gateway_unauthorized_total";
/// Upstream failures counter metric name.
pub const METRIC_UPSTREAM_FAILURES: &str = "gateway_upstream_failures_total";
/// Upstream fetch latency metric name.
pub const METRIC_UPSTREAM_LATENCY: &str = "gateway_upstream_latency_ms";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_counter!(METRIC_REQUESTS, "Total number of inbound requests");
    describe_counter!(
        METRIC_UNAUTHORIZED,
        "Total number of requests rejected before reaching the handler"
    );
    describe_counter!(
        METRIC_UPSTREAM_FAILURES,
        "Total number of failed userecho fetches"
    );
    describe_histogram!(
        METRIC_UPSTREAM_LATENCY,
        "Userecho fetch latency in milliseconds"
    );

    debug!("Metrics initialized");
}

/// Increment the inbound request counter for a route.
pub fn inc_requests(route: &'static str) {
    counter!(METRIC_REQUESTS, "route" => route).increment(1);
}

/// Increment the unauthorized rejection counter.
pub fn inc_unauthorized() {
    counter!(METRIC_UNAUTHORIZED).increment(1);
}

/// Increment the upstream failure counter.
pub fn inc_upstream_failures() {
    counter!(METRIC_UPSTREAM_FAILURES).increment(1);
}

/// Record upstream fetch latency.
pub fn record_upstream_latency(start: Instant) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_UPSTREAM_LATENCY).record(latency_ms);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_without_a_recorder_is_a_noop() {
        // The metrics facade drops everything when no recorder is installed.
        inc_requests("/user");
        inc_unauthorized();
        inc_upstream_failures();
        record_upstream_latency(Instant::now());
    }
}
