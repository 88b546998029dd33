//! Observability subsystem.
//!
//! Structured logging is initialized in `main` via `tracing-subscriber`;
//! this module owns the Prometheus metrics exporter and the recording
//! helpers used by the HTTP layer and the aggregator.

pub mod metrics;
