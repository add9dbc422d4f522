//! Spawned reply turns with an explicit abort.
//!
//! `spawn_reply` runs a turn on its own task and hands chunks back through a
//! channel. The turn keeps running if the handle is dropped; only
//! [`ReplyHandle::abort`] (or cancelling the shared token) stops it.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use hydrowatt_types::chat::{ChatMessage, StreamChunk};

use crate::context::source::UsageSource;

use super::engine::StreamingReplyEngine;

/// Caller's side of an in-flight reply turn.
pub struct ReplyHandle {
    chunks: mpsc::UnboundedReceiver<StreamChunk>,
    cancel: CancellationToken,
}

impl ReplyHandle {
    /// Next chunk of the turn, or `None` once the turn's task has ended and
    /// every chunk was received. The last chunk before `None` is always the
    /// terminal one.
    pub async fn next_chunk(&mut self) -> Option<StreamChunk> {
        self.chunks.recv().await
    }

    /// Cancel the turn. The open request or body read is dropped and a
    /// terminal chunk is still delivered.
    pub fn abort(&self) {
        self.cancel.cancel();
    }

    /// A clone of the turn's cancellation token, for wiring to other
    /// signals (Ctrl+C, client disconnect).
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Drain the turn and return the concatenated reply text.
    pub async fn collect_text(mut self) -> String {
        let mut reply = String::new();
        while let Some(chunk) = self.next_chunk().await {
            if let Some(content) = chunk.content {
                reply.push_str(&content);
            }
            if chunk.done {
                break;
            }
        }
        reply
    }
}

impl<S: UsageSource + 'static> StreamingReplyEngine<S> {
    /// Run a turn on a new task and return a handle to its chunks.
    pub fn spawn_reply(self: Arc<Self>, history: Vec<ChatMessage>, input: String) -> ReplyHandle {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        tokio::spawn(async move {
            self.stream_reply(&history, &input, &token, |chunk| {
                // Receiver gone means nobody is listening; the turn finishes anyway.
                let _ = tx.send(chunk);
            })
            .await;
            debug!("Spawned reply turn finished");
        });

        ReplyHandle {
            chunks: rx,
            cancel,
        }
    }
}
