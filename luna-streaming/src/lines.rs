//! Line assembly across chunk boundaries.

/// Buffers partial lines between chunks, yielding only complete lines.
///
/// At most one partial line is held between calls. At end of stream the
/// caller must invoke [`LineAssembler::finish`] to obtain the final
/// unterminated line, if any.
#[derive(Debug, Default)]
pub struct LineAssembler {
    buffer: String,
}

impl LineAssembler {
    /// Create a new assembler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed decoded text, returning the complete lines it closes.
    ///
    /// Line terminators (`\n`, with an optional preceding `\r`) are
    /// stripped. The trailing segment without a terminator stays buffered.
    pub fn feed(&mut self, text: &str) -> Vec<String> {
        self.buffer.push_str(text);

        let mut lines = Vec::new();
        while let Some(pos) = self.buffer.find('\n') {
            let mut line: String = self.buffer.drain(..=pos).collect();
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
            lines.push(line);
        }
        lines
    }

    /// Flush the held-over partial line at end of stream.
    ///
    /// This is the only point where a non-newline-terminated line is
    /// legitimate.
    pub fn finish(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.buffer))
        }
    }

    /// True if a partial line is buffered.
    #[must_use]
    pub fn has_partial(&self) -> bool {
        !self.buffer.is_empty()
    }
}
