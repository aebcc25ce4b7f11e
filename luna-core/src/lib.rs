//! # luna-core
//!
//! Core types for the luna chat client.
//!
//! This crate provides the foundational types shared across the luna
//! workspace:
//!
//! - **Messages**: chat roles, messages, and conversation history
//! - **Identifiers**: prefixed IDs and UTC timestamps
//!
//! ## Example
//!
//! ```rust
//! use luna_core::{ChatMessage, Conversation};
//!
//! let mut conversation = Conversation::new();
//! conversation.push(ChatMessage::user("Hello!"));
//!
//! let wire = conversation.to_request_messages();
//! assert_eq!(wire.len(), 1);
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod identifier;
pub mod messages;

pub use identifier::{generate_conversation_id, generate_message_id, now_utc};
pub use messages::{ChatMessage, Conversation, RequestMessage, Role};
