//! Server-sent event frame parsing.
//!
//! The wire format is line based: relevant lines begin with `data: `
//! followed by either the literal `[DONE]` or a JSON chunk. Blank separator
//! lines and any other event fields are framing noise and are skipped
//! silently. A malformed payload is skipped too (logged, never fatal to the
//! session).

use crate::wire::ChatCompletionChunk;

const DATA_PREFIX: &str = "data: ";
const DONE_SENTINEL: &str = "[DONE]";

/// One parsed frame of the event stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseFrame {
    /// An incremental text delta (may be empty).
    Delta(String),
    /// The terminal sentinel; no further frames follow.
    Done,
}

/// Parse one line of the event stream.
///
/// Returns `None` for non-`data: ` lines and for payloads that fail to
/// parse; both are expected framing noise, not errors.
pub fn parse_line(line: &str) -> Option<SseFrame> {
    let payload = line.strip_prefix(DATA_PREFIX)?.trim();

    if payload == DONE_SENTINEL {
        return Some(SseFrame::Done);
    }

    match serde_json::from_str::<ChatCompletionChunk>(payload) {
        Ok(chunk) => Some(SseFrame::Delta(chunk.delta_content().to_string())),
        Err(error) => {
            tracing::warn!("skipping malformed SSE chunk: {error} - data: {payload}");
            None
        }
    }
}
