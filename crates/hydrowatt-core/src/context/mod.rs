//! Per-turn context gathering.
//!
//! - `UsageSource`: port for the dashboard's read-only data queries
//! - `summary`: reducers turning raw records into one-line digests
//! - `ContextAggregator`: concurrent scatter/gather over a source

pub mod aggregator;
pub mod source;
pub mod summary;
