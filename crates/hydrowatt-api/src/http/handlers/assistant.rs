//! Assistant endpoints: streamed replies over SSE and the current context.

use std::convert::Infallible;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures_util::Stream;
use serde::Deserialize;
use tracing::{debug, warn};

use hydrowatt_types::chat::{ChatMessage, MessageRole};
use hydrowatt_types::context::ContextSummary;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StreamReplyRequest {
    pub message: String,
    /// Prior conversation, oldest first. The engine keeps the most recent
    /// `history_limit` non-empty entries.
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryEntry {
    pub role: MessageRole,
    pub content: String,
}

/// POST /api/v1/assistant/stream - one reply turn as SSE `chunk` events.
///
/// Each event carries a `StreamChunk` as JSON; the last one has
/// `done: true`. A client that disconnects cancels the turn.
pub async fn stream_reply(
    State(state): State<AppState>,
    body: Result<Json<StreamReplyRequest>, JsonRejection>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    let Json(body) = body?;
    if body.message.trim().is_empty() {
        return Err(AppError::Validation("message must not be empty".to_string()));
    }

    let history: Vec<ChatMessage> = body
        .history
        .into_iter()
        .map(|entry| ChatMessage::new(entry.role, entry.content))
        .collect();
    debug!(history = history.len(), "Streaming assistant reply");

    let mut handle = Arc::clone(&state.engine).spawn_reply(history, body.message);
    // Dropping the response body (client gone) drops the guard and cancels.
    let guard = handle.cancel_token().drop_guard();

    let sse_stream = async_stream::stream! {
        let _guard = guard;
        while let Some(chunk) = handle.next_chunk().await {
            let done = chunk.done;
            match Event::default().event("chunk").json_data(&chunk) {
                Ok(event) => yield Ok::<_, Infallible>(event),
                Err(e) => warn!(error = %e, "Failed to encode stream chunk"),
            }
            if done {
                break;
            }
        }
    };

    Ok(Sse::new(sse_stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(15))))
}

/// GET /api/v1/assistant/context - the three summaries.
pub async fn get_context(State(state): State<AppState>) -> ApiResponse<ContextSummary> {
    let started = Instant::now();
    let summary = state.engine.aggregator().build_context_summaries().await;
    ApiResponse::success(summary, started.elapsed().as_millis() as u64)
}

#[cfg(test)]
mod tests {
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use chrono::Local;
    use tower::ServiceExt;

    use hydrowatt_core::assistant::command::HELP_TEXT;
    use hydrowatt_types::chat::StreamChunk;
    use hydrowatt_types::usage::UsageReading;

    use crate::http::router::build_router;
    use crate::state::AppState;
    use crate::state::test_support::offline_state;

    async fn app() -> (tempfile::TempDir, AppState, Router) {
        let dir = tempfile::tempdir().unwrap();
        let state = offline_state(dir.path()).await;
        let router = build_router(state.clone());
        (dir, state, router)
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    /// Decode every `data:` line of an SSE body into chunks.
    fn sse_chunks(body: &str) -> Vec<StreamChunk> {
        body.lines()
            .filter_map(|line| line.strip_prefix("data:"))
            .map(|data| serde_json::from_str(data.trim()).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_stream_command_reply() {
        let (_dir, _state, router) = app().await;

        let response = router
            .oneshot(post_json("/api/v1/assistant/stream", r#"{"message":"/help"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response.headers()[header::CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with("text/event-stream")
        );

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(body.contains("event: chunk"));

        let chunks = sse_chunks(&body);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].content.as_deref(), Some(HELP_TEXT));
        assert!(!chunks[0].done);
        assert!(chunks[1].done);
    }

    #[tokio::test]
    async fn test_stream_offline_reply_with_history() {
        let (_dir, _state, router) = app().await;

        let body = r#"{"message":"hello","history":[{"role":"user","content":"hi"},{"role":"assistant","content":"Hello!"}]}"#;
        let response = router
            .oneshot(post_json("/api/v1/assistant/stream", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let chunks = sse_chunks(&String::from_utf8(bytes.to_vec()).unwrap());
        let text: String = chunks.iter().filter_map(|c| c.content.clone()).collect();
        assert!(!text.is_empty());
        assert_eq!(chunks.iter().filter(|c| c.done).count(), 1);
        assert!(chunks.last().unwrap().done);
    }

    #[tokio::test]
    async fn test_stream_rejects_empty_message() {
        let (_dir, _state, router) = app().await;

        let response = router
            .oneshot(post_json("/api/v1/assistant/stream", r#"{"message":"   "}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["errors"][0]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_stream_rejects_malformed_body() {
        let (_dir, _state, router) = app().await;

        let response = router
            .oneshot(post_json("/api/v1/assistant/stream", r#"{"text":"hi"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_context_endpoint() {
        let (_dir, state, router) = app().await;
        state
            .usage_source()
            .record_reading(&UsageReading {
                room: "Kitchen".to_string(),
                water: 20.0,
                electricity: 4.0,
                recorded_on: Local::now().date_naive(),
            })
            .await
            .unwrap();

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/v1/assistant/context")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(json["data"]["usage_summary"].as_str().unwrap().contains("Kitchen"));
        assert_eq!(json["data"]["billing_summary"], "");
    }

    #[tokio::test]
    async fn test_health() {
        let (_dir, _state, router) = app().await;

        let response = router
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["status"], "ok");
        assert!(json["provider"].is_null());
    }
}
