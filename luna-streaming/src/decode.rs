//! Incremental UTF-8 decoding.
//!
//! The transport delivers bytes with no respect for character boundaries, so
//! a multi-byte sequence can be split across two chunks. [`Utf8Decoder`]
//! holds the incomplete tail between calls and prepends it to the next
//! chunk, so the concatenation of all returned fragments equals the decoded
//! stream with nothing dropped or reordered.

/// Streaming UTF-8 decoder with carry-over state.
#[derive(Debug, Default)]
pub struct Utf8Decoder {
    /// Incomplete trailing sequence from the previous chunk (at most 3 bytes).
    pending: Vec<u8>,
}

impl Utf8Decoder {
    /// Create a new decoder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the next chunk of the stream.
    ///
    /// Invalid interior bytes become U+FFFD rather than being dropped. An
    /// incomplete sequence at the end of the chunk is held back until the
    /// next call.
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        if self.pending.is_empty() {
            return self.decode_inner(chunk);
        }
        let mut joined = std::mem::take(&mut self.pending);
        joined.extend_from_slice(chunk);
        self.decode_inner(&joined)
    }

    /// Flush at end of stream.
    ///
    /// A still-incomplete trailing sequence is replaced with U+FFFD; stream
    /// termination is never an error.
    pub fn finish(&mut self) -> String {
        if self.pending.is_empty() {
            String::new()
        } else {
            self.pending.clear();
            '\u{FFFD}'.to_string()
        }
    }

    /// True if the decoder is holding an incomplete sequence.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    fn decode_inner(&mut self, mut input: &[u8]) -> String {
        let mut out = String::with_capacity(input.len());

        loop {
            match std::str::from_utf8(input) {
                Ok(text) => {
                    out.push_str(text);
                    return out;
                }
                Err(err) => {
                    let (valid, rest) = input.split_at(err.valid_up_to());
                    // `valid` was just verified, so the lossy conversion borrows
                    out.push_str(&String::from_utf8_lossy(valid));

                    match err.error_len() {
                        Some(len) => {
                            out.push('\u{FFFD}');
                            input = &rest[len..];
                        }
                        None => {
                            // Possibly-valid prefix at the very end; keep for next chunk
                            self.pending = rest.to_vec();
                            return out;
                        }
                    }
                }
            }
        }
    }
}
