//! Completion request assembly.
//!
//! The system prompt wraps each context summary in its own XML tag so the
//! model can tell the data sections apart:
//!
//! ```text
//! <instructions>...</instructions>
//! <usage>{usage_summary or "unavailable"}</usage>
//! <billing>{billing_summary or "unavailable"}</billing>
//! <devices>{device_summary or "unavailable"}</devices>
//! ```

use hydrowatt_types::chat::ChatMessage;
use hydrowatt_types::context::ContextSummary;
use hydrowatt_types::llm::{CompletionRequest, Message, MessageRole};

use super::engine::ReplySettings;

const INSTRUCTIONS: &str = "You are the Hydrowatt assistant, built into a home water and \
electricity monitoring dashboard. Answer briefly and concretely using the household data \
below. When a section is unavailable, say so instead of guessing. Suggest practical ways to \
save water and energy when relevant.";

/// Build the system prompt for one turn.
pub fn build_system_prompt(context: &ContextSummary) -> String {
    [
        format!("<instructions>\n{INSTRUCTIONS}\n</instructions>"),
        section("usage", &context.usage_summary),
        section("billing", &context.billing_summary),
        section("devices", &context.device_summary),
    ]
    .join("\n\n")
}

fn section(tag: &str, summary: &str) -> String {
    let body = if summary.is_empty() {
        "unavailable"
    } else {
        summary
    };
    format!("<{tag}>\n{body}\n</{tag}>")
}

/// Build the streamed completion request: system prompt, the most recent
/// `history_limit` non-empty history messages, then the new user input.
pub fn build_completion_request(
    settings: &ReplySettings,
    context: &ContextSummary,
    history: &[ChatMessage],
    input: &str,
) -> CompletionRequest {
    let recent: Vec<&ChatMessage> = history
        .iter()
        .filter(|m| !m.content.trim().is_empty())
        .collect();
    let skip = recent.len().saturating_sub(settings.history_limit);

    let mut messages = Vec::with_capacity(recent.len() - skip + 2);
    messages.push(Message {
        role: MessageRole::System,
        content: build_system_prompt(context),
    });
    messages.extend(recent.into_iter().skip(skip).map(|m| Message {
        role: m.role,
        content: m.content.clone(),
    }));
    messages.push(Message {
        role: MessageRole::User,
        content: input.to_string(),
    });

    CompletionRequest {
        model: settings.model.clone(),
        messages,
        temperature: settings.temperature,
        stream: true,
    }
}
