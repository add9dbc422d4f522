//! Per-turn context summaries handed to the assistant.

use serde::{Deserialize, Serialize};

/// Short human-readable digests of the dashboard's data sources.
///
/// Each field is independently empty when its source was unavailable for
/// this turn. Rebuilt on every turn; never cached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextSummary {
    pub usage_summary: String,
    pub billing_summary: String,
    pub device_summary: String,
}

impl ContextSummary {
    /// True when no source contributed anything this turn.
    pub fn is_empty(&self) -> bool {
        self.usage_summary.is_empty()
            && self.billing_summary.is_empty()
            && self.device_summary.is_empty()
    }
}
