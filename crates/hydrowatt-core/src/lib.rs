//! Assistant business logic and port definitions for Hydrowatt.
//!
//! This crate defines the "ports" (data source and LLM provider traits) that
//! the infrastructure layer implements, plus the streaming reply engine that
//! drives one assistant turn. It depends only on `hydrowatt-types` -- never on
//! `hydrowatt-infra` or any database/HTTP crate.

pub mod assistant;
pub mod context;
pub mod llm;
pub mod stream;
