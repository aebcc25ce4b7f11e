//! Per-response session accumulation.
//!
//! A [`StreamSession`] owns the whole decode pipeline for one in-flight
//! response: UTF-8 decoding, line assembly, frame parsing, tag splitting,
//! and the two cumulative output buffers. Chunks must be pushed strictly in
//! arrival order; the session is not meant to be shared across responses.

use crate::decode::Utf8Decoder;
use crate::lines::LineAssembler;
use crate::sse::{parse_line, SseFrame};
use crate::tags::ThinkingTagSplitter;

/// The cumulative state published after a processed delta.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Visible answer text accumulated so far.
    pub answer: String,
    /// Thinking text accumulated so far; `None` while empty.
    pub thinking: Option<String>,
    /// True once the session ended (sentinel, end of stream, or cancel).
    pub finished: bool,
}

/// Accumulates one streamed response from raw byte chunks.
#[derive(Debug, Default)]
pub struct StreamSession {
    decoder: Utf8Decoder,
    lines: LineAssembler,
    splitter: ThinkingTagSplitter,
    answer: String,
    thinking: String,
    finished: bool,
}

impl StreamSession {
    /// Create a session with the default `<think>` markers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session with custom thinking markers.
    #[must_use]
    pub fn with_tags(start_tag: impl Into<String>, end_tag: impl Into<String>) -> Self {
        Self {
            splitter: ThinkingTagSplitter::with_tags(start_tag, end_tag),
            ..Self::default()
        }
    }

    /// The visible answer accumulated so far.
    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// The thinking text accumulated so far.
    #[must_use]
    pub fn thinking(&self) -> &str {
        &self.thinking
    }

    /// True once the session ended.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Process one raw chunk, returning a snapshot per processed delta.
    ///
    /// One snapshot is produced for every non-empty delta so that callers
    /// can publish updates at the server's own granularity, plus one
    /// terminal snapshot when the `[DONE]` sentinel is seen. Lines after
    /// the sentinel, even within the same chunk, are ignored. Chunks pushed
    /// after the session finished are ignored entirely.
    pub fn push_chunk(&mut self, chunk: &[u8]) -> Vec<Snapshot> {
        if self.finished {
            return Vec::new();
        }

        let text = self.decoder.decode(chunk);
        let mut snapshots = Vec::new();
        for line in self.lines.feed(&text) {
            if let Some(snapshot) = self.process_line(&line) {
                snapshots.push(snapshot);
            }
            if self.finished {
                break;
            }
        }
        snapshots
    }

    /// End of the byte stream: flush every stage and finish the session.
    ///
    /// Safe to call after the sentinel was already seen; the returned
    /// snapshot is then simply the final state. An unterminated thinking
    /// block keeps its accumulated text.
    pub fn finish(&mut self) -> Snapshot {
        if !self.finished {
            let tail = self.decoder.finish();
            let mut last_lines = self.lines.feed(&tail);
            if let Some(partial) = self.lines.finish() {
                last_lines.push(partial);
            }
            for line in last_lines {
                let _ = self.process_line(&line);
                if self.finished {
                    break;
                }
            }
            self.end_session();
        }
        self.snapshot()
    }

    /// Abandon the session, keeping what accumulated so far.
    ///
    /// No further chunks are accepted. The returned snapshot carries the
    /// partial text so the caller may surface it as a canceled state.
    pub fn cancel(&mut self) -> Snapshot {
        if !self.finished {
            self.end_session();
        }
        self.snapshot()
    }

    /// Current state as a snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            answer: self.answer.clone(),
            thinking: (!self.thinking.is_empty()).then(|| self.thinking.clone()),
            finished: self.finished,
        }
    }

    fn process_line(&mut self, line: &str) -> Option<Snapshot> {
        match parse_line(line)? {
            SseFrame::Done => {
                self.end_session();
                Some(self.snapshot())
            }
            SseFrame::Delta(delta) if delta.is_empty() => None,
            SseFrame::Delta(delta) => {
                self.splitter
                    .split(&delta, &mut self.answer, &mut self.thinking);
                Some(self.snapshot())
            }
        }
    }

    fn end_session(&mut self) {
        self.splitter.finish(&mut self.answer, &mut self.thinking);
        self.finished = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn delta_line(content: &str) -> String {
        format!(
            "data: {{\"choices\":[{{\"delta\":{{\"content\":{}}}}}]}}\n",
            serde_json::to_string(content).unwrap()
        )
    }

    #[test]
    fn test_single_chunk_with_done() {
        let mut session = StreamSession::new();
        let snapshots = session
            .push_chunk(b"data: {\"choices\":[{\"delta\":{\"content\":\"Hi\"}}]}\n\ndata: [DONE]\n");

        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[0].answer, "Hi");
        assert!(!snapshots[0].finished);
        assert_eq!(snapshots[1].answer, "Hi");
        assert!(snapshots[1].finished);
        assert!(session.is_finished());
    }

    #[test]
    fn test_snapshot_per_delta_not_per_chunk() {
        let mut session = StreamSession::new();
        let body = format!("{}{}", delta_line("Hel"), delta_line("lo"));
        let snapshots = session.push_chunk(body.as_bytes());

        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[0].answer, "Hel");
        assert_eq!(snapshots[1].answer, "Hello");
    }

    #[test]
    fn test_empty_delta_produces_no_snapshot() {
        let mut session = StreamSession::new();
        let snapshots = session.push_chunk(b"data: {\"choices\":[{\"delta\":{}}]}\n");
        assert!(snapshots.is_empty());
        assert_eq!(session.answer(), "");
        assert_eq!(session.thinking(), "");
    }

    #[test]
    fn test_malformed_line_skipped_next_frame_processed() {
        let mut session = StreamSession::new();
        let body = format!("data: {{not json\n{}", delta_line("ok"));
        let snapshots = session.push_chunk(body.as_bytes());

        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].answer, "ok");
    }

    #[test]
    fn test_lines_after_done_ignored() {
        let mut session = StreamSession::new();
        let body = format!("data: [DONE]\n{}", delta_line("late"));
        let snapshots = session.push_chunk(body.as_bytes());

        assert_eq!(snapshots.len(), 1);
        assert!(snapshots[0].finished);
        assert_eq!(session.answer(), "");
    }

    #[test]
    fn test_chunks_after_finish_ignored() {
        let mut session = StreamSession::new();
        session.push_chunk(b"data: [DONE]\n");
        let snapshots = session.push_chunk(delta_line("late").as_bytes());
        assert!(snapshots.is_empty());
    }

    #[test]
    fn test_thinking_split_across_network_chunks() {
        let mut session = StreamSession::new();
        session.push_chunk(delta_line("Hello ").as_bytes());
        session.push_chunk(delta_line("<thi").as_bytes());
        session.push_chunk(delta_line("nk>plan</think> world").as_bytes());
        let final_snapshot = session.finish();

        assert_eq!(final_snapshot.answer, "Hello  world");
        assert_eq!(final_snapshot.thinking.as_deref(), Some("plan"));
        assert!(final_snapshot.finished);
    }

    #[test]
    fn test_chunk_boundary_invariance() {
        let body = format!(
            "{}{}{}data: [DONE]\n",
            delta_line("One <think>two"),
            delta_line("</think> three"),
            delta_line(" four")
        );
        let bytes = body.as_bytes();

        // Deliver the same byte stream at several chunk sizes, including
        // sizes that split UTF-8 sequences, lines, and JSON objects.
        let mut finals = Vec::new();
        for size in [1, 2, 3, 7, 16, bytes.len()] {
            let mut session = StreamSession::new();
            for chunk in bytes.chunks(size) {
                session.push_chunk(chunk);
            }
            finals.push(session.finish());
        }

        for snapshot in &finals {
            assert_eq!(snapshot.answer, "One  three four");
            assert_eq!(snapshot.thinking.as_deref(), Some("two"));
            assert!(snapshot.finished);
        }
    }

    #[test]
    fn test_multibyte_split_across_chunks() {
        let mut session = StreamSession::new();
        let body = delta_line("héllo");
        let bytes = body.as_bytes();
        // Split inside the two-byte "é"
        let split_at = body.find('é').unwrap() + 1;
        session.push_chunk(&bytes[..split_at]);
        session.push_chunk(&bytes[split_at..]);
        let snapshot = session.finish();

        assert_eq!(snapshot.answer, "héllo");
    }

    #[test]
    fn test_line_split_across_chunks() {
        let mut session = StreamSession::new();
        let line = delta_line("Hi");
        let (left, right) = line.split_at(12);
        assert!(session.push_chunk(left.as_bytes()).is_empty());
        let snapshots = session.push_chunk(right.as_bytes());

        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].answer, "Hi");
    }

    #[test]
    fn test_finish_flushes_unterminated_final_line() {
        let mut session = StreamSession::new();
        // No trailing newline on the last frame
        let line = delta_line("end");
        session.push_chunk(line.trim_end().as_bytes());
        let snapshot = session.finish();

        assert_eq!(snapshot.answer, "end");
        assert!(snapshot.finished);
    }

    #[test]
    fn test_unterminated_thinking_block() {
        let mut session = StreamSession::new();
        session.push_chunk(delta_line("a<think>half-done").as_bytes());
        let snapshot = session.finish();

        assert_eq!(snapshot.answer, "a");
        assert_eq!(snapshot.thinking.as_deref(), Some("half-done"));
        assert!(snapshot.finished);
    }

    #[test]
    fn test_cancel_keeps_partial_state() {
        let mut session = StreamSession::new();
        session.push_chunk(delta_line("partial ans").as_bytes());
        let snapshot = session.cancel();

        assert_eq!(snapshot.answer, "partial ans");
        assert!(snapshot.finished);
        assert!(session.push_chunk(delta_line("more").as_bytes()).is_empty());
    }

    #[test]
    fn test_non_data_lines_never_change_state() {
        let mut session = StreamSession::new();
        let snapshots =
            session.push_chunk(b": comment\nevent: ping\nretry: 100\n\nid: 7\n");
        assert!(snapshots.is_empty());
        assert_eq!(
            session.snapshot(),
            Snapshot {
                answer: String::new(),
                thinking: None,
                finished: false,
            }
        );
    }
}
