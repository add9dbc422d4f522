//! Server-sent event record parsing for OpenAI-compatible completion streams.

use serde::Deserialize;

const DATA_PREFIX: &str = "data:";
const DONE_SENTINEL: &str = "[DONE]";

/// One meaningful line of the event stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseRecord {
    /// A `data:` payload, prefix stripped and trimmed.
    Data(String),
    /// The `data: [DONE]` end-of-stream sentinel.
    Done,
}

/// Parse one line. Anything that is not a `data:` line (comments, `event:`
/// and `id:` fields, blank separators) yields `None`.
pub fn parse_line(line: &str) -> Option<SseRecord> {
    let payload = line.strip_prefix(DATA_PREFIX)?.trim();
    if payload == DONE_SENTINEL {
        Some(SseRecord::Done)
    } else {
        Some(SseRecord::Data(payload.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct ChunkPayload {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
}

#[derive(Debug, Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: Option<ChunkDelta>,
}

#[derive(Debug, Deserialize)]
struct ChunkDelta {
    #[serde(default)]
    content: Option<String>,
}

/// Extract `choices[0].delta.content` from a data payload.
///
/// `Ok(None)` means the payload was valid but carried no text (role-only
/// deltas, finish_reason chunks, usage records).
pub fn extract_delta(payload: &str) -> Result<Option<String>, serde_json::Error> {
    let chunk: ChunkPayload = serde_json::from_str(payload)?;
    Ok(chunk
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.delta)
        .and_then(|delta| delta.content))
}
