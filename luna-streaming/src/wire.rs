//! Typed schema for streamed chat completion chunks.
//!
//! Only the fields the decoder consumes are required: a chunk must carry a
//! `choices` array, everything else is optional. An absent `delta.content`
//! is a valid no-op frame (e.g. a role announcement or a bare
//! `finish_reason` chunk).

use serde::Deserialize;

/// One streamed chat completion chunk.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionChunk {
    /// Response ID.
    #[serde(default)]
    pub id: Option<String>,
    /// Model that produced the chunk.
    #[serde(default)]
    pub model: Option<String>,
    /// Response choices.
    pub choices: Vec<ChunkChoice>,
}

impl ChatCompletionChunk {
    /// The incremental text of the first choice, defaulting to empty.
    #[must_use]
    pub fn delta_content(&self) -> &str {
        self.choices
            .first()
            .and_then(|choice| choice.delta.content.as_deref())
            .unwrap_or_default()
    }
}

/// One choice within a chunk.
#[derive(Debug, Clone, Deserialize)]
pub struct ChunkChoice {
    /// Choice index.
    #[serde(default)]
    pub index: u32,
    /// Incremental delta.
    #[serde(default)]
    pub delta: ChunkDelta,
    /// Finish reason, present on the final content chunk.
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// The incremental delta of a choice.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChunkDelta {
    /// Role announcement (first chunk of a response).
    #[serde(default)]
    pub role: Option<String>,
    /// Incremental text content.
    #[serde(default)]
    pub content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_content_chunk() {
        let json = r#"{"id":"123","object":"chat.completion.chunk","created":1234567890,"model":"luna-small","choices":[{"index":0,"delta":{"content":"Hello"}}]}"#;
        let chunk: ChatCompletionChunk = serde_json::from_str(json).unwrap();
        assert_eq!(chunk.delta_content(), "Hello");
    }

    #[test]
    fn test_parse_minimal_chunk() {
        // Only `choices` is required
        let chunk: ChatCompletionChunk =
            serde_json::from_str(r#"{"choices":[{"delta":{}}]}"#).unwrap();
        assert_eq!(chunk.delta_content(), "");
    }

    #[test]
    fn test_parse_role_announcement() {
        let json = r#"{"choices":[{"index":0,"delta":{"role":"assistant"}}]}"#;
        let chunk: ChatCompletionChunk = serde_json::from_str(json).unwrap();
        assert_eq!(chunk.choices[0].delta.role.as_deref(), Some("assistant"));
        assert_eq!(chunk.delta_content(), "");
    }

    #[test]
    fn test_missing_choices_is_error() {
        assert!(serde_json::from_str::<ChatCompletionChunk>(r#"{"id":"123"}"#).is_err());
    }
}
