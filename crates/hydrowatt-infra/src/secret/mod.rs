//! API key resolution.
//!
//! Keys are read once at startup and passed to the provider explicitly;
//! nothing below `hydrowatt-api` reads the environment on its own.

pub mod env;
