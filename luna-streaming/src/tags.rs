//! Thinking-tag splitting.
//!
//! Models embed their reasoning inline as `<think>...</think>` blocks.
//! [`ThinkingTagSplitter`] routes every character of every delta to exactly
//! one of two buffers: marker-delimited text to the thinking buffer,
//! everything else to the answer buffer. The marker text itself is consumed
//! and appears in neither.
//!
//! State persists across deltas, so a block that opens in one delta and
//! closes several deltas later is routed correctly. A marker split across
//! two deltas (e.g. `"<thi"` then `"nk>"`) is handled by buffering a
//! partial-marker suffix and re-prepending it to the next delta.

/// Default start marker for a thinking block.
pub const THINK_START_TAG: &str = "<think>";
/// Default end marker for a thinking block.
pub const THINK_END_TAG: &str = "</think>";

/// Two-state splitter routing delta text between answer and thinking.
#[derive(Debug, Clone)]
pub struct ThinkingTagSplitter {
    start_tag: String,
    end_tag: String,
    /// True while inside a thinking block.
    in_thinking: bool,
    /// Potential partial marker held from the tail of the previous delta.
    partial_tag_buffer: String,
}

impl Default for ThinkingTagSplitter {
    fn default() -> Self {
        Self::with_tags(THINK_START_TAG, THINK_END_TAG)
    }
}

impl ThinkingTagSplitter {
    /// Create a splitter with the default `<think>` markers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a splitter with custom markers.
    ///
    /// Both markers must be non-empty.
    #[must_use]
    pub fn with_tags(start_tag: impl Into<String>, end_tag: impl Into<String>) -> Self {
        Self {
            start_tag: start_tag.into(),
            end_tag: end_tag.into(),
            in_thinking: false,
            partial_tag_buffer: String::new(),
        }
    }

    /// True while inside a thinking block.
    #[must_use]
    pub fn is_inside(&self) -> bool {
        self.in_thinking
    }

    /// Split one delta, appending to the two output buffers.
    pub fn split(&mut self, delta: &str, answer: &mut String, thinking: &mut String) {
        if self.partial_tag_buffer.is_empty() {
            self.split_inner(delta, answer, thinking);
        } else {
            // Re-process the held-back suffix together with the new delta
            let mut combined = std::mem::take(&mut self.partial_tag_buffer);
            combined.push_str(delta);
            self.split_inner(&combined, answer, thinking);
        }
    }

    /// Flush at end of session.
    ///
    /// A partial marker that never completed is ordinary text; it goes to
    /// whichever buffer the current state selects, so no character of any
    /// delta is ever lost.
    pub fn finish(&mut self, answer: &mut String, thinking: &mut String) {
        if self.partial_tag_buffer.is_empty() {
            return;
        }
        let leftover = std::mem::take(&mut self.partial_tag_buffer);
        if self.in_thinking {
            thinking.push_str(&leftover);
        } else {
            answer.push_str(&leftover);
        }
    }

    fn split_inner(&mut self, mut remaining: &str, answer: &mut String, thinking: &mut String) {
        while !remaining.is_empty() {
            let (tag, buffer): (&str, &mut String) = if self.in_thinking {
                (&self.end_tag, thinking)
            } else {
                (&self.start_tag, answer)
            };

            if let Some(pos) = remaining.find(tag) {
                buffer.push_str(&remaining[..pos]);
                remaining = &remaining[pos + tag.len()..];
                self.in_thinking = !self.in_thinking;
            } else {
                if let Some(partial) = find_partial_tag_suffix(remaining, tag) {
                    buffer.push_str(&remaining[..remaining.len() - partial.len()]);
                    self.partial_tag_buffer = partial.to_string();
                } else {
                    buffer.push_str(remaining);
                }
                break;
            }
        }
    }
}

/// Longest proper prefix of `tag` that is a suffix of `text`, if any.
fn find_partial_tag_suffix<'a>(text: &'a str, tag: &str) -> Option<&'a str> {
    let mut longest = None;
    for (len, _) in tag.char_indices().skip(1) {
        if text.ends_with(&tag[..len]) {
            longest = Some(len);
        }
    }
    longest.map(|len| &text[text.len() - len..])
}
