//! Chat completion request body.

use luna_core::{Conversation, RequestMessage};
use serde::Serialize;

/// The request body for `/v1/chat/completions`.
///
/// `stream` is always true; this client only supports the streaming
/// response path.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    /// Model name.
    pub model: String,
    /// Full conversation history, oldest first.
    pub messages: Vec<RequestMessage>,
    /// Request a streamed response.
    pub stream: bool,
}

impl ChatCompletionRequest {
    /// Build a request from a conversation.
    #[must_use]
    pub fn new(model: impl Into<String>, conversation: &Conversation) -> Self {
        Self {
            model: model.into(),
            messages: conversation.to_request_messages(),
            stream: true,
        }
    }
}
