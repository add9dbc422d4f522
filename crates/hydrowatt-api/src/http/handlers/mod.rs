//! HTTP request handlers.

pub mod assistant;
