//! Incremental decoding of a streamed completion body.
//!
//! Two layers, kept apart so either can be tested alone:
//! - [`line_decoder::LineDecoder`]: byte reads in, complete lines out
//! - [`sse`]: one line in, one `data:` record (and its text fragment) out

pub mod line_decoder;
pub mod sse;
