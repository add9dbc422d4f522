//! Infrastructure layer for Hydrowatt.
//!
//! Contains implementations of the ports defined in `hydrowatt-core`:
//! the SQLite usage source, the OpenAI-compatible streaming provider, the
//! `config.toml` loader and environment-based API key lookup.

pub mod config;
pub mod llm;
pub mod secret;
pub mod sqlite;
