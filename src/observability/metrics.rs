//! Metrics collection and exposition.
//!
//! # Metrics
//! - `vanity_requests_total` (counter): requests by outcome
//! - `vanity_request_duration_seconds` (histogram): handling latency

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// How a request was answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Found,
    NotFound,
    Denied,
    RenderError,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Found => "found",
            Outcome::NotFound => "not_found",
            Outcome::Denied => "denied",
            Outcome::RenderError => "render_error",
        }
    }
}

/// Start the Prometheus scrape endpoint. Requires a running Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_request(outcome: Outcome, start: Instant) {
    metrics::counter!("vanity_requests_total", "outcome" => outcome.as_str()).increment(1);
    metrics::histogram!("vanity_request_duration_seconds").record(start.elapsed().as_secs_f64());
}
