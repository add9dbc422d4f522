//! The assistant's per-turn reply pipeline.
//!
//! - `command`: slash-command routing that answers from context alone
//! - `fallback`: keyword replies used when no provider is configured
//! - `prompt`: completion request assembly
//! - `engine`: `StreamingReplyEngine`, which drives a whole turn
//! - `handle`: spawned turns with an explicit abort
//! - `transcript`: applies a turn's chunks to the caller's message log

pub mod command;
pub mod engine;
pub mod fallback;
pub mod handle;
pub mod prompt;
pub mod transcript;
