//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_checks_total` (counter): checks by outcome
//! - `relay_check_duration_seconds` (histogram): outbound HEAD latency
//! - `relay_icon_fetches_total` (counter): icon requests by HTTP status
//! - `relay_icon_fetch_duration_seconds` (histogram): time to response headers
//!
//! Recording is a no-op until [`init_metrics`] installs the Prometheus
//! exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::http::response::CheckStatus;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_check(outcome: CheckStatus, start: Instant) {
    counter!("relay_checks_total", "outcome" => outcome.as_str()).increment(1);
    histogram!("relay_check_duration_seconds").record(start.elapsed().as_secs_f64());
}

pub fn record_icon_fetch(status: u16, start: Instant) {
    counter!("relay_icon_fetches_total", "status" => status.to_string()).increment(1);
    histogram!("relay_icon_fetch_duration_seconds").record(start.elapsed().as_secs_f64());
}
