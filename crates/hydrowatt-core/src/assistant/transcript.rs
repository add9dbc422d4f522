//! In-memory conversation log for callers of the reply engine.
//!
//! Each turn appends the user message and an empty assistant placeholder.
//! Chunks are appended to the placeholder until the terminal chunk freezes
//! it; anything arriving after that is ignored.

use hydrowatt_types::chat::{ChatMessage, StreamChunk};

#[derive(Debug, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
    /// Index of the assistant placeholder still receiving fragments.
    pending: Option<usize>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Whether a turn is waiting for its terminal chunk.
    pub fn is_streaming(&self) -> bool {
        self.pending.is_some()
    }

    /// Start a turn: record the user message and an assistant placeholder.
    ///
    /// Returns the history to send with the turn, i.e. every message before
    /// this one. A turn still streaming is frozen first, and its placeholder
    /// is dropped if nothing arrived.
    pub fn begin_turn(&mut self, input: &str) -> Vec<ChatMessage> {
        if let Some(index) = self.pending.take() {
            if self.messages[index].content.is_empty() {
                self.messages.remove(index);
            }
        }
        let history = self.messages.clone();
        self.messages.push(ChatMessage::user(input));
        self.messages.push(ChatMessage::assistant_placeholder());
        self.pending = Some(self.messages.len() - 1);
        history
    }

    /// Apply one chunk to the current placeholder. Returns `true` when this
    /// chunk ended the turn.
    pub fn apply(&mut self, chunk: &StreamChunk) -> bool {
        let Some(index) = self.pending else {
            return false;
        };
        if let Some(fragment) = chunk.content.as_deref() {
            self.messages[index].push_fragment(fragment);
        }
        if chunk.done {
            self.pending = None;
            return true;
        }
        false
    }

    /// The most recent assistant message, finished or not.
    pub fn last_reply(&self) -> Option<&ChatMessage> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == hydrowatt_types::chat::MessageRole::Assistant)
    }

    pub fn clear(&mut self) {
        self.messages.clear();
        self.pending = None;
    }
}
