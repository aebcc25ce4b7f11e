//! Streaming chat client.

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::request::ChatCompletionRequest;
use bytes::Bytes;
use futures::stream::BoxStream;
use futures::{Stream, StreamExt};
use luna_core::Conversation;
use luna_streaming::{Snapshot, SnapshotStream, StreamError};
use pin_project_lite::pin_project;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio_util::sync::{CancellationToken, WaitForCancellationFutureOwned};

type ByteStream = BoxStream<'static, Result<Bytes, reqwest::Error>>;

/// Client for a luna device's chat completions endpoint.
#[derive(Debug, Clone)]
pub struct LunaClient {
    config: ClientConfig,
    client: reqwest::Client,
}

impl LunaClient {
    /// Create a client from configuration.
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_default();
        Self { config, client }
    }

    /// Create a client from environment variables.
    pub fn from_env() -> ClientResult<Self> {
        Ok(Self::new(ClientConfig::from_env()?))
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send the conversation and stream back snapshots of the response.
    ///
    /// A non-success status is a terminal failure surfaced as
    /// [`ClientError::Http`]; nothing is retried. The returned
    /// [`ChatStream`] yields one [`Snapshot`] per server delta and exactly
    /// one terminal snapshot with `finished = true`.
    pub async fn chat_stream(&self, conversation: &Conversation) -> ClientResult<ChatStream> {
        let body = ChatCompletionRequest::new(&self.config.model, conversation);
        let url = self.config.completions_url();

        tracing::debug!(
            model = %body.model,
            messages = body.messages.len(),
            %url,
            "sending streaming chat completion request"
        );

        let response = self.client.post(&url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Http {
                status: status.as_u16(),
                body,
            });
        }

        Ok(ChatStream::new(response.bytes_stream().boxed()))
    }

    /// Send the conversation, invoking `on_update` for every snapshot.
    ///
    /// Returns the final `(answer, thinking)` pair once the stream
    /// finishes. The callback also sees the terminal snapshot.
    pub async fn chat_stream_with<F>(
        &self,
        conversation: &Conversation,
        mut on_update: F,
    ) -> ClientResult<(String, Option<String>)>
    where
        F: FnMut(&Snapshot),
    {
        let mut stream = self.chat_stream(conversation).await?;

        let mut last = None;
        while let Some(snapshot) = stream.next().await {
            let snapshot = snapshot?;
            on_update(&snapshot);
            last = Some(snapshot);
        }

        let last = last
            .ok_or_else(|| ClientError::InvalidResponse("stream ended without output".into()))?;
        Ok((last.answer, last.thinking))
    }
}

impl Default for LunaClient {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

pin_project! {
    /// Byte stream that ends early when its cancellation token fires.
    struct CancellableBytes {
        #[pin]
        inner: ByteStream,
        cancelled: Pin<Box<WaitForCancellationFutureOwned>>,
        is_cancelled: bool,
    }
}

impl Stream for CancellableBytes {
    type Item = Result<Bytes, reqwest::Error>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();

        if !*this.is_cancelled && this.cancelled.as_mut().poll(cx).is_ready() {
            *this.is_cancelled = true;
        }
        if *this.is_cancelled {
            // Dropping the read here closes the connection when the
            // stream itself is dropped; we just stop consuming.
            return Poll::Ready(None);
        }

        this.inner.poll_next(cx)
    }
}

pin_project! {
    /// A streamed chat response.
    ///
    /// Yields `Result<Snapshot, StreamError>` items. Cancelling via
    /// [`ChatStream::cancel`] (or a clone of [`ChatStream::cancel_token`])
    /// stops reading; the stream then yields one final snapshot built from
    /// whatever accumulated, marked `finished`, and ends.
    pub struct ChatStream {
        #[pin]
        inner: SnapshotStream<CancellableBytes>,
        token: CancellationToken,
    }
}

impl std::fmt::Debug for ChatStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatStream").finish_non_exhaustive()
    }
}

impl ChatStream {
    fn new(bytes: ByteStream) -> Self {
        let token = CancellationToken::new();
        let cancellable = CancellableBytes {
            inner: bytes,
            cancelled: Box::pin(token.clone().cancelled_owned()),
            is_cancelled: false,
        };
        Self {
            inner: SnapshotStream::new(cancellable),
            token,
        }
    }

    /// Cancel the stream.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// A token that cancels this stream when triggered.
    ///
    /// Clones share the same cancellation state, so the token can be handed
    /// to another task (e.g. a "stop generating" button handler).
    #[must_use]
    pub fn cancel_token(&self) -> CancellationToken {
        self.token.clone()
    }
}

impl Stream for ChatStream {
    type Item = Result<Snapshot, StreamError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.project().inner.poll_next(cx)
    }
}
