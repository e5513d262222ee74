//! Scrollable log body and the policy that feeds it
//!
//! [`ViewportSync`] pushes the tracked build's buffer into a [`TextSurface`]
//! whenever it changed. A surface that showed the last line before the update
//! shows the last line after it; one the user scrolled up stays put.

use super::ansi::to_lines;
use super::scroll::ScrollState;
use crate::config::WrapConfig;
use crate::sync::BuildBuffer;
use crate::text::wordwrap::wrap_with;
use ratatui::text::Line;

/// A scrollable text display
pub trait TextSurface {
    /// Replace the whole content; scroll offset is kept (clamped)
    fn set_content(&mut self, text: &str);

    /// Whether the last line is currently visible
    fn at_bottom(&self) -> bool;

    fn scroll_to_bottom(&mut self);
}

/// Keeps a surface in step with the tracked build's buffer
#[derive(Debug, Default)]
pub struct ViewportSync {
    /// Build and buffer length last pushed to the surface
    synced: Option<(u64, usize)>,
}

impl ViewportSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push `buffer` into `surface` if it changed since the last call
    ///
    /// Returns true if the surface was updated.
    pub fn sync<S: TextSurface>(&mut self, surface: &mut S, buffer: Option<&BuildBuffer>) -> bool {
        let Some(buffer) = buffer else {
            return false;
        };

        let key = (buffer.build(), buffer.len());
        if self.synced == Some(key) {
            return false;
        }

        let follow = surface.at_bottom();
        surface.set_content(buffer.text());
        if follow {
            surface.scroll_to_bottom();
        }

        self.synced = Some(key);
        true
    }
}

/// Wrapped, styled console output with its scroll position
#[derive(Debug)]
pub struct LogViewport {
    wrap: WrapConfig,
    /// Wrap limit in columns (0 until the first layout)
    width: usize,
    content: String,
    lines: Vec<Line<'static>>,
    scroll: ScrollState,
}

impl LogViewport {
    pub fn new(wrap: WrapConfig) -> Self {
        Self {
            wrap,
            width: 0,
            content: String::new(),
            lines: Vec::new(),
            scroll: ScrollState::new(),
        }
    }

    /// Adapt to a new body size, re-wrapping when the width changed
    ///
    /// Follows the same stick-to-bottom rule as a content update.
    pub fn resize(&mut self, width: usize, height: usize) {
        if width == self.width && height == self.scroll.viewport() {
            return;
        }

        let follow = self.at_bottom();
        if width != self.width {
            self.width = width;
            self.rewrap();
        }
        self.scroll.update_dimensions(self.lines.len(), height);
        if follow {
            self.scroll.scroll_to_bottom();
        }
    }

    /// Lines inside the viewport
    pub fn visible_lines(&self) -> &[Line<'static>] {
        let (start, end) = self.scroll.visible_range();
        &self.lines[start..end]
    }

    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    pub fn scroll_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn rewrap(&mut self) {
        if self.content.is_empty() {
            self.lines.clear();
            return;
        }

        let wrapped = wrap_with(&self.content, self.wrap.options(self.width));
        // A final newline terminates the last line rather than opening a new one
        let wrapped = wrapped.strip_suffix('\n').unwrap_or(&wrapped);
        self.lines = to_lines(wrapped);
    }
}

impl TextSurface for LogViewport {
    fn set_content(&mut self, text: &str) {
        self.content.clear();
        self.content.push_str(text);
        self.rewrap();
        self.scroll
            .update_dimensions(self.lines.len(), self.scroll.viewport());
    }

    fn at_bottom(&self) -> bool {
        self.scroll.at_bottom()
    }

    fn scroll_to_bottom(&mut self) {
        self.scroll.scroll_to_bottom();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::{BuildTracker, LogChunk};

    fn tracker_with(build: u64, pieces: &[&str]) -> BuildTracker {
        let mut tracker = BuildTracker::new();
        tracker.observe(build);
        let mut offset = 0;
        for piece in pieces {
            tracker.apply(
                build,
                &LogChunk {
                    start: offset,
                    text: piece.to_string(),
                    more_data: true,
                    new_offset: offset + piece.len() as u64,
                },
            );
            offset += piece.len() as u64;
        }
        tracker
    }

    fn numbered(n: usize) -> String {
        (0..n).map(|i| format!("line {}\n", i)).collect()
    }

    fn viewport(width: usize, height: usize) -> LogViewport {
        let mut v = LogViewport::new(WrapConfig::default());
        v.resize(width, height);
        v
    }

    #[test]
    fn test_follows_when_at_bottom() {
        let mut v = viewport(40, 5);
        let mut sync = ViewportSync::new();

        let tracker = tracker_with(1, &[&numbered(3)]);
        assert!(sync.sync(&mut v, tracker.buffer()));
        assert_eq!(v.line_count(), 3);

        let tracker = tracker_with(1, &[&numbered(3), &numbered(10)]);
        sync.sync(&mut v, tracker.buffer());
        assert_eq!(v.line_count(), 13);
        assert!(v.at_bottom());
        assert_eq!(v.scroll().offset(), 8);
    }

    #[test]
    fn test_scrolled_up_view_stays_put() {
        let mut v = viewport(40, 5);
        let mut sync = ViewportSync::new();

        sync.sync(&mut v, tracker_with(1, &[&numbered(20)]).buffer());
        assert_eq!(v.scroll().offset(), 15);

        v.scroll_mut().page_up();
        assert_eq!(v.scroll().offset(), 10);

        sync.sync(&mut v, tracker_with(1, &[&numbered(20), "more\n"]).buffer());
        assert_eq!(v.scroll().offset(), 10);
        assert!(!v.at_bottom());
    }

    #[test]
    fn test_unchanged_buffer_is_not_pushed() {
        let mut v = viewport(40, 5);
        let mut sync = ViewportSync::new();
        let tracker = tracker_with(1, &["a\n"]);

        assert!(sync.sync(&mut v, tracker.buffer()));
        assert!(!sync.sync(&mut v, tracker.buffer()));
        assert!(!sync.sync(&mut v, None));
    }

    #[test]
    fn test_new_build_replaces_content() {
        let mut v = viewport(40, 5);
        let mut sync = ViewportSync::new();

        sync.sync(&mut v, tracker_with(1, &["x\n"]).buffer());
        // Same length, different build
        assert!(sync.sync(&mut v, tracker_with(2, &["y\n"]).buffer()));
        assert_eq!(v.line_count(), 1);
    }

    #[test]
    fn test_lines_are_wrapped_to_width() {
        let mut v = viewport(4, 10);
        v.set_content("foo bar foo\n");
        assert_eq!(v.line_count(), 3);
    }

    #[test]
    fn test_resize_rewraps_and_keeps_stickiness() {
        let mut v = viewport(80, 2);
        let text = "alpha beta gamma delta\n".repeat(4);
        v.set_content(&text);
        v.scroll_to_bottom();
        assert_eq!(v.line_count(), 4);

        v.resize(6, 2);
        assert_eq!(v.line_count(), 16);
        assert!(v.at_bottom());

        v.scroll_mut().scroll_to_top();
        v.resize(12, 2);
        assert_eq!(v.scroll().offset(), 0);
    }

    #[test]
    fn test_visible_lines_window() {
        let mut v = viewport(40, 3);
        v.set_content(&numbered(10));
        v.scroll_to_bottom();

        let visible: Vec<String> = v
            .visible_lines()
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();
        assert_eq!(visible, vec!["line 7", "line 8", "line 9"]);
    }

    struct Recording {
        bottom: bool,
        calls: Vec<&'static str>,
    }

    impl TextSurface for Recording {
        fn set_content(&mut self, _text: &str) {
            self.calls.push("set");
        }
        fn at_bottom(&self) -> bool {
            self.bottom
        }
        fn scroll_to_bottom(&mut self) {
            self.calls.push("bottom");
        }
    }

    #[test]
    fn test_policy_checks_position_before_update() {
        let tracker = tracker_with(1, &["a"]);

        let mut surface = Recording {
            bottom: true,
            calls: Vec::new(),
        };
        ViewportSync::new().sync(&mut surface, tracker.buffer());
        assert_eq!(surface.calls, vec!["set", "bottom"]);

        let mut surface = Recording {
            bottom: false,
            calls: Vec::new(),
        };
        ViewportSync::new().sync(&mut surface, tracker.buffer());
        assert_eq!(surface.calls, vec!["set"]);
    }
}
