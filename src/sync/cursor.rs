//! Progressive-read cursor and chunk shape
//!
//! A progressive read returns the bytes appended since `offset` together with
//! two hints: whether more bytes are expected (`more_data`) and the offset to
//! use next (`new_offset`). `new_offset` is authoritative and is not
//! necessarily `offset + text.len()`.
//!
//! `more_data = true` covers both "the build is still running" and "end of
//! stream not confirmed yet"; the signal does not say which.

/// One progressive-read response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogChunk {
    /// Offset the request was issued at
    pub start: u64,
    /// Decoded bytes (possibly empty)
    pub text: String,
    pub more_data: bool,
    /// Offset for the next request
    pub new_offset: u64,
}

impl LogChunk {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Read position within one build's log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogCursor {
    pub offset: u64,
    pub more_data: bool,
}

impl LogCursor {
    /// Start of a fresh build: nothing read, more expected
    pub fn new() -> Self {
        Self {
            offset: 0,
            more_data: true,
        }
    }

    /// Move past an applied chunk
    pub fn advance(&mut self, chunk: &LogChunk) {
        self.offset = chunk.new_offset;
        self.more_data = chunk.more_data;
    }
}

impl Default for LogCursor {
    fn default() -> Self {
        Self::new()
    }
}
