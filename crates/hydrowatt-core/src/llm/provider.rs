//! LlmProvider trait definition.
//!
//! A provider opens one streamed completion exchange and hands back the raw
//! response body as a stream of byte chunks. Decoding the body into reply
//! fragments is the engine's job (see `crate::stream`), so a provider only
//! deals with transport: URL, headers, status codes.

use std::pin::Pin;

use futures_util::Stream;

use hydrowatt_types::llm::{CompletionRequest, LlmError};

/// Raw response body, one item per network read.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Vec<u8>, LlmError>> + Send + 'static>>;

/// Trait for LLM provider backends (OpenAI, Gemini, Mistral, ...).
///
/// Implementations live in hydrowatt-infra (e.g., `OpenAiCompatibleProvider`).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openai").
    fn name(&self) -> &str;

    /// Send a streaming completion request and return the response body.
    ///
    /// Resolves once response headers arrive; a non-success status is an error.
    fn open_stream(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<ByteStream, LlmError>> + Send;
}
