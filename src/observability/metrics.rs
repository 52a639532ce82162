//! Process-local counters and Prometheus exposition.
//!
//! # Metrics
//! - `metrics_publish_sent_total` (counter): samples accepted by the collector
//! - `metrics_publish_dropped_total` (counter): failed samples, by reason

use metrics::counter;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Prometheus endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install Prometheus recorder"),
    }
}

pub fn record_publish_sent() {
    counter!("metrics_publish_sent_total").increment(1);
}

pub fn record_publish_dropped(reason: &'static str) {
    counter!("metrics_publish_dropped_total", "reason" => reason).increment(1);
}
