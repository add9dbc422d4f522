//! Slash commands answered directly from the context summaries.
//!
//! Matching is on the trimmed, lower-cased input by prefix. Unrecognized
//! slash input is not an error: it goes to the general reply path like any
//! other question.

use hydrowatt_types::context::ContextSummary;

/// Static help text for `/help`.
pub const HELP_TEXT: &str = "Available commands:\n\
/usage - weekly water and electricity usage with the per-room breakdown\n\
/billing - the current billing period\n\
/devices - how many devices are registered and active\n\
/help - this list\n\
Anything else is answered as a free-form question.";

/// A recognized assistant command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssistantCommand {
    Usage,
    Devices,
    Billing,
    Help,
}

/// Recognize a command prefix. Returns `None` for everything else,
/// including unknown slash input.
pub fn parse(input: &str) -> Option<AssistantCommand> {
    let normalized = input.trim().to_lowercase();

    if normalized.starts_with("/usage") {
        Some(AssistantCommand::Usage)
    } else if normalized.starts_with("/devices") {
        Some(AssistantCommand::Devices)
    } else if normalized.starts_with("/billing") {
        Some(AssistantCommand::Billing)
    } else if normalized.starts_with("/help") {
        Some(AssistantCommand::Help)
    } else {
        None
    }
}

impl AssistantCommand {
    /// The canned reply for this command.
    pub fn reply(self, context: &ContextSummary) -> String {
        match self {
            AssistantCommand::Usage => {
                or_unavailable(&context.usage_summary, "Usage data is not available right now.")
            }
            AssistantCommand::Devices => {
                or_unavailable(&context.device_summary, "Device data is not available right now.")
            }
            AssistantCommand::Billing => {
                or_unavailable(&context.billing_summary, "Billing data is not available right now.")
            }
            AssistantCommand::Help => HELP_TEXT.to_string(),
        }
    }
}

pub(crate) fn or_unavailable(summary: &str, placeholder: &str) -> String {
    if summary.is_empty() {
        placeholder.to_string()
    } else {
        summary.to_string()
    }
}
