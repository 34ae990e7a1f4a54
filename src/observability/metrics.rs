//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gate_requests_total` (counter): admission decisions, by `decision`
//! - `gate_in_flight_requests` (gauge): admitted, not yet completed
//! - `gate_drain_duration_seconds` (histogram): seal to drained
//!
//! Without an installed recorder every call is a no-op, so tests need no
//! setup.

use std::net::SocketAddr;
use std::time::Duration;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::gate::Decision;

/// Install the Prometheus recorder and its scrape listener.
///
/// Must be called from inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_admission(decision: Decision) {
    counter!("gate_requests_total", "decision" => decision.as_str()).increment(1);
}

/// Applied as deltas so concurrent updates cannot publish a stale count.
pub fn in_flight_started() {
    gauge!("gate_in_flight_requests").increment(1.0);
}

pub fn in_flight_finished() {
    gauge!("gate_in_flight_requests").decrement(1.0);
}

pub fn record_drain(elapsed: Duration) {
    histogram!("gate_drain_duration_seconds").record(elapsed.as_secs_f64());
}
