//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Request handling produces:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Structured fields (client_ip, path, request_id) for machine parsing
//! - Request ID flows through every log line of a request
//! - Metrics are recorded even when no exporter is installed (no-op)

pub mod logging;
pub mod metrics;
