//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_cors_preflight_total` (counter): preflights answered without
//!   reaching the service
//! - `gateway_headers_dropped_total` (counter): headers not translated, by
//!   reason (`matcher` or `invalid_name`)

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_preflight() {
    metrics::counter!("gateway_cors_preflight_total").increment(1);
}

/// Why a header was not carried across the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// The matcher declined the header.
    Matcher,
    /// The mapped key is not a legal header name.
    InvalidName,
}

impl DropReason {
    pub fn as_str(self) -> &'static str {
        match self {
            DropReason::Matcher => "matcher",
            DropReason::InvalidName => "invalid_name",
        }
    }
}

pub fn record_dropped_header(reason: DropReason) {
    metrics::counter!("gateway_headers_dropped_total", "reason" => reason.as_str()).increment(1);
}
