//! # luna-client
//!
//! HTTP client for a luna device's OpenAI-compatible chat endpoint.
//!
//! The client POSTs the conversation history to `/v1/chat/completions` with
//! `stream: true` and consumes the chunked SSE response through
//! `luna-streaming`, yielding a [`Snapshot`](luna_streaming::Snapshot) per
//! server delta.
//!
//! ## Example
//!
//! ```ignore
//! use luna_client::{ClientConfig, LunaClient};
//! use luna_core::{ChatMessage, Conversation};
//!
//! let client = LunaClient::new(ClientConfig::default());
//!
//! let mut conversation = Conversation::new();
//! conversation.push(ChatMessage::user("Hello!"));
//!
//! let (answer, thinking) = client
//!     .chat_stream_with(&conversation, |snapshot| {
//!         print!("\r{}", snapshot.answer);
//!     })
//!     .await?;
//!
//! conversation.push(
//!     ChatMessage::assistant(answer).with_thinking(thinking.unwrap_or_default()),
//! );
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod client;
pub mod config;
pub mod discover;
pub mod error;
pub mod request;

pub use client::{ChatStream, LunaClient};
pub use config::ClientConfig;
pub use discover::{find_device, probe_base_urls, DEFAULT_PROBE_PORTS};
pub use error::{ClientError, ClientResult};
pub use request::ChatCompletionRequest;
