//! Chat message and stream chunk types.
//!
//! A turn starts with the caller appending a user message and an empty
//! assistant placeholder to its own log. The engine then delivers
//! [`StreamChunk`]s until exactly one of them carries `done = true`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Re-export MessageRole from llm module (it's used in both chat and llm contexts).
pub use crate::llm::MessageRole;

/// A single message in the caller's conversation log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a message with a fresh time-sortable id.
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            role,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    /// An empty assistant message that a turn's fragments are appended to.
    pub fn assistant_placeholder() -> Self {
        Self::new(MessageRole::Assistant, String::new())
    }

    /// Append a streamed fragment to this message's content.
    pub fn push_fragment(&mut self, fragment: &str) {
        self.content.push_str(fragment);
    }
}

/// One event delivered to the caller during a reply turn.
///
/// Serializes as `{"content":"..."}` for fragments and `{"done":true}` for
/// the terminal marker, omitting absent fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamChunk {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub done: bool,
}

impl StreamChunk {
    /// A content fragment.
    pub fn content(text: impl Into<String>) -> Self {
        Self {
            content: Some(text.into()),
            done: false,
        }
    }

    /// The terminal marker for a turn.
    pub fn done() -> Self {
        Self {
            content: None,
            done: true,
        }
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}
