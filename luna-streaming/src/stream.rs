//! Stream adapter over a chunked byte stream.

use crate::error::StreamError;
use crate::session::{Snapshot, StreamSession};
use bytes::Bytes;
use futures::Stream;
use pin_project_lite::pin_project;
use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};

pin_project! {
    /// Adapts a byte stream (e.g. `reqwest::Response::bytes_stream`) into a
    /// stream of [`Snapshot`]s.
    ///
    /// Chunks are processed synchronously as they arrive; the stream yields
    /// one snapshot per processed delta and exactly one terminal snapshot
    /// with `finished = true`. A transport error yields a single
    /// [`StreamError::Transport`] and then ends the stream.
    pub struct SnapshotStream<S> {
        #[pin]
        inner: S,
        session: StreamSession,
        queued: VecDeque<Snapshot>,
        done: bool,
    }
}

impl<S> SnapshotStream<S> {
    /// Wrap a byte stream with a fresh session.
    pub fn new(inner: S) -> Self {
        Self::with_session(inner, StreamSession::new())
    }

    /// Wrap a byte stream with a preconfigured session (custom markers).
    pub fn with_session(inner: S, session: StreamSession) -> Self {
        Self {
            inner,
            session,
            queued: VecDeque::new(),
            done: false,
        }
    }
}

impl<S, E> Stream for SnapshotStream<S>
where
    S: Stream<Item = Result<Bytes, E>>,
    E: std::fmt::Display,
{
    type Item = Result<Snapshot, StreamError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            if let Some(snapshot) = this.queued.pop_front() {
                return Poll::Ready(Some(Ok(snapshot)));
            }
            if *this.done {
                return Poll::Ready(None);
            }

            match this.inner.as_mut().poll_next(cx) {
                Poll::Ready(Some(Ok(bytes))) => {
                    this.queued.extend(this.session.push_chunk(&bytes));
                }
                Poll::Ready(Some(Err(error))) => {
                    *this.done = true;
                    return Poll::Ready(Some(Err(StreamError::Transport(error.to_string()))));
                }
                Poll::Ready(None) => {
                    *this.done = true;
                    // The terminal snapshot was already published if the
                    // sentinel arrived; don't publish it twice.
                    if this.session.is_finished() {
                        return Poll::Ready(None);
                    }
                    return Poll::Ready(Some(Ok(this.session.finish())));
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
