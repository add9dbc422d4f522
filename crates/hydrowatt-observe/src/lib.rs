//! Observability setup for Hydrowatt: structured logging plus optional
//! OpenTelemetry span export.

pub mod tracing_setup;
