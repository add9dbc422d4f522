//! Streaming reply engine for the Hydrowatt assistant.
//!
//! `StreamingReplyEngine` drives one assistant turn: it gathers fresh context,
//! answers slash commands locally, falls back to keyword replies when no
//! provider is configured, and otherwise streams a completion from the
//! provider, decoding the body line by line.
//!
//! Whatever happens, the caller's callback sees zero or more content chunks
//! followed by exactly one terminal chunk. Errors become an apology chunk;
//! nothing is returned to the caller.

use futures_util::StreamExt;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info, info_span, warn};

use hydrowatt_types::chat::{ChatMessage, StreamChunk};
use hydrowatt_types::config::AssistantConfig;
use hydrowatt_types::llm::{CompletionRequest, LlmError};

use crate::context::aggregator::ContextAggregator;
use crate::context::source::UsageSource;
use crate::llm::box_provider::BoxLlmProvider;
use crate::stream::line_decoder::LineDecoder;
use crate::stream::sse::{self, SseRecord};

use super::command;
use super::fallback::fallback_reply;
use super::prompt::build_completion_request;

/// Request parameters applied to every provider turn.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplySettings {
    pub model: String,
    pub temperature: f64,
    /// Maximum number of prior messages sent with a request.
    pub history_limit: usize,
}

impl Default for ReplySettings {
    fn default() -> Self {
        Self::from(&AssistantConfig::default())
    }
}

impl From<&AssistantConfig> for ReplySettings {
    fn from(config: &AssistantConfig) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
            history_limit: config.history_limit,
        }
    }
}

/// How a provider stream ended, when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StreamOutcome {
    /// `[DONE]` sentinel seen.
    Sentinel,
    /// Body ended without the sentinel.
    Eof,
    Cancelled,
}

/// Produces an assistant reply as a sequence of [`StreamChunk`]s.
///
/// The provider is injected at construction; `None` selects the keyword
/// fallback for every free-form turn.
pub struct StreamingReplyEngine<S: UsageSource> {
    aggregator: ContextAggregator<S>,
    provider: Option<BoxLlmProvider>,
    settings: ReplySettings,
}

impl<S: UsageSource> StreamingReplyEngine<S> {
    pub fn new(source: S, provider: Option<BoxLlmProvider>, settings: ReplySettings) -> Self {
        Self {
            aggregator: ContextAggregator::new(source),
            provider,
            settings,
        }
    }

    /// The context aggregator used for every turn.
    pub fn aggregator(&self) -> &ContextAggregator<S> {
        &self.aggregator
    }

    pub fn settings(&self) -> &ReplySettings {
        &self.settings
    }

    /// Name of the configured provider, if any.
    pub fn provider_name(&self) -> Option<&str> {
        self.provider.as_ref().map(|p| p.name())
    }

    /// Run one turn, delivering chunks to `on_chunk` as they are produced.
    ///
    /// `history` is the conversation before this turn; `input` is the new
    /// user message. Triggering `cancel` stops the turn at its next
    /// suspension point, drops any open response body and still delivers
    /// the terminal chunk.
    pub async fn stream_reply<F>(
        &self,
        history: &[ChatMessage],
        input: &str,
        cancel: &CancellationToken,
        on_chunk: F,
    ) where
        F: FnMut(StreamChunk) + Send,
    {
        let mut emitter = ChunkEmitter::new(on_chunk);

        let context = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                info!("Reply cancelled before context was built");
                emitter.finish();
                return;
            }
            context = self.aggregator.build_context_summaries() => context,
        };

        if let Some(command) = command::parse(input) {
            debug!(?command, "Answering command from context");
            emitter.content(command.reply(&context));
            emitter.finish();
            return;
        }

        let Some(provider) = &self.provider else {
            debug!("No provider configured, using fallback reply");
            emitter.content(fallback_reply(input, &context));
            emitter.finish();
            return;
        };

        let request = build_completion_request(&self.settings, &context, history, input);
        let span = info_span!(
            "gen_ai.stream_reply",
            gen_ai.system = provider.name(),
            gen_ai.request.model = %request.model,
            gen_ai.request.temperature = request.temperature,
            messages = request.messages.len(),
        );

        let outcome = stream_completion(provider, &request, cancel, &mut emitter)
            .instrument(span)
            .await;

        match outcome {
            Ok(StreamOutcome::Sentinel) => {
                debug!(fragments = emitter.fragments, "Reply stream completed");
            }
            Ok(StreamOutcome::Eof) => {
                debug!(
                    fragments = emitter.fragments,
                    "Reply stream ended without [DONE] sentinel"
                );
            }
            Ok(StreamOutcome::Cancelled) => {
                info!(fragments = emitter.fragments, "Reply cancelled");
            }
            Err(e) => {
                warn!(
                    provider = provider.name(),
                    error = %e,
                    fragments = emitter.fragments,
                    "Reply stream failed"
                );
                emitter.content(error_message(&e));
            }
        }
        emitter.finish();
    }
}

/// Open the provider stream and forward every decoded fragment.
async fn stream_completion<F>(
    provider: &BoxLlmProvider,
    request: &CompletionRequest,
    cancel: &CancellationToken,
    emitter: &mut ChunkEmitter<F>,
) -> Result<StreamOutcome, LlmError>
where
    F: FnMut(StreamChunk) + Send,
{
    let mut body = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Ok(StreamOutcome::Cancelled),
        opened = provider.open_stream(request) => opened?,
    };

    let mut decoder = LineDecoder::new();
    loop {
        let read = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Ok(StreamOutcome::Cancelled),
            read = body.next() => read,
        };
        let Some(bytes) = read else {
            break;
        };
        for line in decoder.push(&bytes?) {
            if dispatch_line(&line, emitter) {
                return Ok(StreamOutcome::Sentinel);
            }
        }
    }

    // A final record may arrive without its trailing newline.
    if let Some(line) = decoder.finish() {
        if dispatch_line(&line, emitter) {
            return Ok(StreamOutcome::Sentinel);
        }
    }
    Ok(StreamOutcome::Eof)
}

/// Handle one complete line. Returns `true` on the `[DONE]` sentinel.
fn dispatch_line<F>(line: &str, emitter: &mut ChunkEmitter<F>) -> bool
where
    F: FnMut(StreamChunk),
{
    match sse::parse_line(line) {
        None => false,
        Some(SseRecord::Done) => true,
        Some(SseRecord::Data(payload)) => {
            match sse::extract_delta(&payload) {
                Ok(Some(fragment)) if !fragment.is_empty() => emitter.content(fragment),
                Ok(_) => {}
                Err(e) => debug!(error = %e, "Skipping unparseable stream record"),
            }
            false
        }
    }
}

fn error_message(error: &LlmError) -> String {
    match error {
        LlmError::AuthenticationFailed => {
            "Sorry, the assistant could not authenticate with its language model provider. \
             Check the configured API key."
                .to_string()
        }
        LlmError::RateLimited { .. } => {
            "Sorry, the assistant is receiving too many requests right now. \
             Please try again in a moment."
                .to_string()
        }
        other => format!("Sorry, something went wrong while contacting the assistant ({other})."),
    }
}

/// Wraps the caller's callback so that nothing follows the terminal chunk.
struct ChunkEmitter<F> {
    on_chunk: F,
    finished: bool,
    fragments: usize,
}

impl<F: FnMut(StreamChunk)> ChunkEmitter<F> {
    fn new(on_chunk: F) -> Self {
        Self {
            on_chunk,
            finished: false,
            fragments: 0,
        }
    }

    fn content(&mut self, text: String) {
        if self.finished {
            return;
        }
        self.fragments += 1;
        (self.on_chunk)(StreamChunk::content(text));
    }

    fn finish(&mut self) {
        if !self.finished {
            self.finished = true;
            (self.on_chunk)(StreamChunk::done());
        }
    }
}
