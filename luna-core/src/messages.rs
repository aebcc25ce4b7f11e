//! Chat messages and conversation history.
//!
//! A [`Conversation`] is the append-only history for one logical chat. The
//! full history is replayed to the server on every request, so the
//! projection to wire messages ([`Conversation::to_request_messages`]) is
//! part of the request contract: roles are serialized lowercase and the
//! extracted thinking text is never echoed back to the model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identifier::{generate_conversation_id, generate_message_id, now_utc};

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The end user.
    User,
    /// The model.
    Assistant,
    /// System instructions.
    System,
}

/// One message in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique message ID.
    pub id: String,
    /// Author role.
    pub role: Role,
    /// Visible message text.
    pub content: String,
    /// Reasoning text extracted from the stream, if any.
    ///
    /// Only ever present on assistant messages. Kept for display, never
    /// sent back to the server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thinking: Option<String>,
    /// When the message was created.
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a message with the given role and content.
    #[must_use]
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: generate_message_id(),
            role,
            content: content.into(),
            thinking: None,
            timestamp: now_utc(),
        }
    }

    /// Create a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Create an assistant message.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Create a system message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Attach thinking text to this message.
    #[must_use]
    pub fn with_thinking(mut self, thinking: impl Into<String>) -> Self {
        let thinking = thinking.into();
        self.thinking = (!thinking.is_empty()).then_some(thinking);
        self
    }
}

/// A message as sent on the wire: role and content only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestMessage {
    /// Author role.
    pub role: Role,
    /// Message text.
    pub content: String,
}

/// Append-only history for one logical chat.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Conversation {
    /// Unique conversation ID.
    pub id: String,
    /// Messages in arrival order.
    pub messages: Vec<ChatMessage>,
}

impl Conversation {
    /// Create an empty conversation.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: generate_conversation_id(),
            messages: Vec::new(),
        }
    }

    /// Append a message.
    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Number of messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Check if the conversation has no messages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Project the history into the wire message list.
    ///
    /// Drops IDs, timestamps, and thinking text.
    #[must_use]
    pub fn to_request_messages(&self) -> Vec<RequestMessage> {
        self.messages
            .iter()
            .map(|m| RequestMessage {
                role: m.role,
                content: m.content.clone(),
            })
            .collect()
    }
}
