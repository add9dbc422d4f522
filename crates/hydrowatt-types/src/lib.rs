//! Shared domain types for Hydrowatt.
//!
//! This crate contains the types exchanged between the assistant engine,
//! its data sources, and the callers that render its replies: chat messages,
//! stream chunks, usage records, LLM requests, configuration, and errors.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod context;
pub mod error;
pub mod llm;
pub mod usage;
