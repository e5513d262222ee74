// Build tracker - per-build cursor and buffer lifecycle
//
// State Diagram:
//
//   [NoBuild] ──observe(n)──▶ [Tracking(n)] ──observe(n)──┐
//                                  │    ▲                 │
//                                  │    └─────────────────┘
//                                  │ observe(m), m != n
//                                  ▼
//                             [Tracking(m)]   (fresh cursor + buffer)
//
// There is no terminal state. Data read under a build number other than the
// tracked one is meaningless and never reaches the buffer.

use super::cursor::{LogChunk, LogCursor};
use std::ops::Range;

/// Byte range of one applied chunk, both in the remote log and in `text`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkSpan {
    /// Remote offset the chunk was read at
    pub start: u64,
    /// Remote offset after the chunk
    pub end: u64,
    /// Where the chunk's text sits in the concatenated buffer
    pub text: Range<usize>,
}

/// Everything received for one build, in arrival order
#[derive(Debug, Clone)]
pub struct BuildBuffer {
    build: u64,
    text: String,
    chunks: Vec<ChunkSpan>,
}

impl BuildBuffer {
    pub fn new(build: u64) -> Self {
        Self {
            build,
            text: String::new(),
            chunks: Vec::new(),
        }
    }

    pub fn build(&self) -> u64 {
        self.build
    }

    /// Concatenation of all chunks
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Applied chunks with their text, oldest first
    pub fn chunks(&self) -> impl Iterator<Item = (&ChunkSpan, &str)> {
        self.chunks
            .iter()
            .map(move |span| (span, &self.text[span.text.clone()]))
    }

    fn push(&mut self, chunk: &LogChunk) {
        if chunk.text.is_empty() {
            return;
        }

        let begin = self.text.len();
        self.text.push_str(&chunk.text);
        self.chunks.push(ChunkSpan {
            start: chunk.start,
            end: chunk.new_offset,
            text: begin..self.text.len(),
        });
    }
}

/// The build currently being mirrored
#[derive(Debug, Clone)]
pub struct TrackedBuild {
    pub cursor: LogCursor,
    pub buffer: BuildBuffer,
}

impl TrackedBuild {
    fn new(build: u64) -> Self {
        Self {
            cursor: LogCursor::new(),
            buffer: BuildBuffer::new(build),
        }
    }

    pub fn id(&self) -> u64 {
        self.buffer.build()
    }
}

#[derive(Debug, Clone, Default)]
pub enum TrackerState {
    #[default]
    NoBuild,
    Tracking(TrackedBuild),
}

/// Result of comparing a polled build number with the tracked one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    /// New build: cursor and buffer were reset
    Started { previous: Option<u64> },
    /// Same build as before: nothing reset
    Unchanged,
}

/// What happened to a chunk handed to the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkOutcome {
    Applied,
    /// Read under a build number that is no longer tracked
    Stale,
    /// Doesn't start at the cursor; applying it would leave a gap or overlap
    OutOfOrder,
}

/// Build-change detector owning the per-build cursor and buffer
#[derive(Debug, Default)]
pub struct BuildTracker {
    state: TrackerState,
}

impl BuildTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&TrackedBuild> {
        match &self.state {
            TrackerState::NoBuild => None,
            TrackerState::Tracking(tracked) => Some(tracked),
        }
    }

    pub fn current_build(&self) -> Option<u64> {
        self.current().map(TrackedBuild::id)
    }

    pub fn cursor(&self) -> Option<&LogCursor> {
        self.current().map(|t| &t.cursor)
    }

    pub fn buffer(&self) -> Option<&BuildBuffer> {
        self.current().map(|t| &t.buffer)
    }

    /// Compare a polled build number against the tracked one
    ///
    /// A different number (including the very first) replaces the buffer and
    /// resets the cursor to `(0, more_data)` regardless of prior state.
    pub fn observe(&mut self, build: u64) -> Observation {
        let previous = self.current_build();
        if previous == Some(build) {
            return Observation::Unchanged;
        }

        self.state = TrackerState::Tracking(TrackedBuild::new(build));
        Observation::Started { previous }
    }

    /// Fold a chunk read for `build` into the buffer
    pub fn apply(&mut self, build: u64, chunk: &LogChunk) -> ChunkOutcome {
        let TrackerState::Tracking(tracked) = &mut self.state else {
            return ChunkOutcome::Stale;
        };

        if tracked.id() != build {
            return ChunkOutcome::Stale;
        }

        if chunk.start != tracked.cursor.offset || chunk.new_offset < chunk.start {
            return ChunkOutcome::OutOfOrder;
        }

        tracked.buffer.push(chunk);
        tracked.cursor.advance(chunk);
        ChunkOutcome::Applied
    }
}
