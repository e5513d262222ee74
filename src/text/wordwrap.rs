//! Greedy, ANSI-aware word wrapping
//!
//! Text is fed through [`WordWrap::write`] (any number of times) and finished
//! with [`WordWrap::close`]. The writer keeps three buffers:
//!
//! - `buf`: everything already committed to output
//! - `space`: a pending run of whitespace, only materialized once a following
//!   word is known to fit on the same line
//! - `word`: the word being collected, including any escape sequences inside it
//!
//! Lines are broken at whitespace and after hyphens. Words are never split,
//! so a word wider than the limit ends up on a line of its own, as-is.
//! Escape sequences travel with the word they are attached to and contribute
//! nothing to the visible width. A run of escapes with no visible text around
//! it is committed on its own and leaves pending whitespace pending.

use super::ansi::{char_width, is_terminator, ESC};

/// Characters after which a line may be broken (the character is kept)
const BREAKPOINTS: &[char] = &['-'];

/// Wrapping parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrapOptions {
    /// Maximum visible width per line; 0 disables wrapping
    pub limit: usize,
    /// Honor `\n` in the input as forced breaks (false: treat as whitespace)
    pub keep_newlines: bool,
    /// Spaces prepended to every line created by a forced wrap
    pub indent_wrapped: usize,
}

impl WrapOptions {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            keep_newlines: true,
            indent_wrapped: 0,
        }
    }
}

impl Default for WrapOptions {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Streaming word-wrap writer
#[derive(Debug, Clone)]
pub struct WordWrap {
    opts: WrapOptions,

    buf: String,
    space: String,
    space_width: usize,
    word: String,
    word_width: usize,

    /// Visible width of the current output line
    line_len: usize,
    /// Width the current line started with (its indent, if any)
    line_start: usize,
    /// Inside an escape sequence
    in_escape: bool,
    /// Some non-whitespace input has been seen (leading trim without keep_newlines)
    started: bool,
}

impl WordWrap {
    pub fn new(opts: WrapOptions) -> Self {
        Self {
            opts,
            buf: String::new(),
            space: String::new(),
            space_width: 0,
            word: String::new(),
            word_width: 0,
            line_len: 0,
            line_start: 0,
            in_escape: false,
            started: false,
        }
    }

    /// Feed more text into the wrapper
    pub fn write(&mut self, s: &str) {
        if self.opts.limit == 0 && self.opts.keep_newlines {
            self.buf.push_str(s);
            return;
        }

        for c in s.chars() {
            self.push_char(c);
        }
    }

    /// Flush the pending word. Pending whitespace is dropped.
    pub fn close(&mut self) {
        self.add_word();
        self.space.clear();
        self.space_width = 0;
    }

    /// Wrapped output so far
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn into_string(self) -> String {
        self.buf
    }

    fn push_char(&mut self, c: char) {
        let c = if !self.opts.keep_newlines && c == '\n' {
            ' '
        } else {
            c
        };

        if c == ESC {
            self.word.push(c);
            self.in_escape = true;
            return;
        }

        if self.in_escape {
            self.word.push(c);
            if is_terminator(c) {
                self.in_escape = false;
            }
            return;
        }

        if !self.opts.keep_newlines && !self.started {
            if c.is_whitespace() {
                return;
            }
            self.started = true;
        }

        if c == '\n' {
            self.add_word();

            // Whitespace right before an explicit break survives only if it fits
            if !self.wraps() || self.line_len + self.space_width <= self.opts.limit {
                self.buf.push_str(&self.space);
            }
            self.add_newline(false);
        } else if c.is_whitespace() {
            self.add_word();
            self.space.push(c);
            self.space_width += 1;
        } else if BREAKPOINTS.contains(&c) {
            // The breakpoint stays on the line of the word before it
            let width = self.word_width + char_width(c);
            let pending = self.line_len + self.space_width;
            if self.wraps()
                && pending + width > self.opts.limit
                && width < self.opts.limit
                && pending > self.line_start
            {
                self.add_newline(true);
            }

            self.add_space();
            self.add_word();
            self.buf.push(c);
            self.line_len += char_width(c);
        } else {
            self.word.push(c);
            self.word_width += char_width(c);

            let pending = self.line_len + self.space_width;
            if self.wraps()
                && pending + self.word_width > self.opts.limit
                && self.word_width < self.opts.limit
                && pending > self.line_start
            {
                self.add_newline(true);
            }
        }
    }

    fn wraps(&self) -> bool {
        self.opts.limit > 0
    }

    fn add_space(&mut self) {
        self.line_len += self.space_width;
        self.buf.push_str(&self.space);
        self.space.clear();
        self.space_width = 0;
    }

    fn add_word(&mut self) {
        if self.word.is_empty() {
            return;
        }

        // Escapes only: no visible text to justify the pending whitespace yet
        if self.word_width == 0 {
            self.buf.push_str(&self.word);
            self.word.clear();
            return;
        }

        self.add_space();
        self.line_len += self.word_width;
        self.buf.push_str(&self.word);
        self.word.clear();
        self.word_width = 0;
    }

    fn add_newline(&mut self, forced: bool) {
        self.buf.push('\n');

        let indent = if forced { self.opts.indent_wrapped } else { 0 };
        self.buf.extend(std::iter::repeat(' ').take(indent));
        self.line_len = indent;
        self.line_start = indent;

        self.space.clear();
        self.space_width = 0;
    }
}

/// Wrap `s` to `limit` columns, honoring explicit line breaks
pub fn wrap(s: &str, limit: usize) -> String {
    wrap_with(s, WrapOptions::new(limit))
}

/// Wrap `s` with explicit options
pub fn wrap_with(s: &str, opts: WrapOptions) -> String {
    let mut w = WordWrap::new(opts);
    w.write(s);
    w.close();
    w.into_string()
}
