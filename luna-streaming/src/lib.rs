//! # luna-streaming
//!
//! Incremental decoding of streamed chat responses.
//!
//! The luna server answers chat requests with a chunked HTTP body carrying
//! `data: ` framed JSON deltas. The transport splits that body at arbitrary
//! byte boundaries: a chunk can end in the middle of a UTF-8 sequence, a
//! line, a JSON object, or a `<think>` marker. This crate reassembles the
//! pieces into an ordered sequence of [`Snapshot`]s of the visible answer
//! and the extracted thinking text.
//!
//! ## Pipeline
//!
//! raw chunk → [`Utf8Decoder`] → [`LineAssembler`] → [`parse_line`] →
//! [`ThinkingTagSplitter`] → [`StreamSession`] → [`Snapshot`]
//!
//! ## Example
//!
//! ```rust
//! use luna_streaming::StreamSession;
//!
//! let mut session = StreamSession::new();
//! let snapshots = session.push_chunk(
//!     b"data: {\"choices\":[{\"delta\":{\"content\":\"Hi\"}}]}\n\ndata: [DONE]\n",
//! );
//!
//! assert_eq!(snapshots.len(), 2);
//! assert_eq!(snapshots[0].answer, "Hi");
//! assert!(snapshots[1].finished);
//! ```
//!
//! For async consumption, [`SnapshotStream`] adapts any
//! `Stream<Item = Result<Bytes, E>>` (such as `reqwest::Response::bytes_stream`)
//! into a stream of snapshots.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod decode;
pub mod error;
pub mod lines;
pub mod session;
pub mod sse;
pub mod stream;
pub mod tags;
pub mod wire;

pub use decode::Utf8Decoder;
pub use error::{StreamError, StreamResult};
pub use lines::LineAssembler;
pub use session::{Snapshot, StreamSession};
pub use sse::{parse_line, SseFrame};
pub use stream::SnapshotStream;
pub use tags::{ThinkingTagSplitter, THINK_END_TAG, THINK_START_TAG};
pub use wire::{ChatCompletionChunk, ChunkChoice, ChunkDelta};
