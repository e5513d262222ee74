// Scroll state for the log body
//
// Position, content size and viewport size in lines. Following new output is
// not decided here: the viewport asks `at_bottom()` before replacing content
// and calls `scroll_to_bottom()` afterwards if it was.

/// Scroll state for a single panel
#[derive(Debug, Clone, Default)]
pub struct ScrollState {
    /// Current scroll offset (line index at top of viewport)
    offset: usize,

    /// Total number of lines in content
    total: usize,

    /// Number of lines visible in viewport
    viewport: usize,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update content and viewport dimensions, clamping the offset
    pub fn update_dimensions(&mut self, total: usize, viewport: usize) {
        self.total = total;
        self.viewport = viewport;
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn scroll_up(&mut self) {
        self.offset = self.offset.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.offset = (self.offset + 1).min(self.max_offset());
    }

    pub fn page_up(&mut self) {
        let page = self.viewport.max(1);
        self.offset = self.offset.saturating_sub(page);
    }

    pub fn page_down(&mut self) {
        let page = self.viewport.max(1);
        self.offset = (self.offset + page).min(self.max_offset());
    }

    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    /// Last line of content is visible (always true when everything fits)
    pub fn at_bottom(&self) -> bool {
        self.offset >= self.max_offset()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Get visible range (start_index, end_index)
    pub fn visible_range(&self) -> (usize, usize) {
        let start = self.offset;
        let end = (self.offset + self.viewport).min(self.total);
        (start, end)
    }

    /// Check if content overflows viewport (scrollbar needed)
    pub fn needs_scrollbar(&self) -> bool {
        self.total > self.viewport
    }

    /// Maximum valid offset
    fn max_offset(&self) -> usize {
        self.total.saturating_sub(self.viewport)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn viewport(&self) -> usize {
        self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_growing_content_keeps_offset() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(10, 5);
        assert_eq!(scroll.offset(), 0);
        assert!(!scroll.at_bottom());

        scroll.update_dimensions(15, 5);
        assert_eq!(scroll.offset(), 0);
    }

    #[test]
    fn test_shrinking_content_clamps_offset() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(20, 5);
        scroll.scroll_to_bottom();
        assert_eq!(scroll.offset(), 15);

        scroll.update_dimensions(8, 5);
        assert_eq!(scroll.offset(), 3);
        assert!(scroll.at_bottom());
    }

    #[test]
    fn test_scroll_bounds() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(20, 5);

        scroll.scroll_up();
        assert_eq!(scroll.offset(), 0);

        scroll.page_down();
        scroll.page_down();
        scroll.page_down();
        scroll.page_down();
        assert_eq!(scroll.offset(), 15);
        assert!(scroll.at_bottom());

        scroll.scroll_down();
        assert_eq!(scroll.offset(), 15);

        scroll.page_up();
        assert_eq!(scroll.offset(), 10);
        assert!(!scroll.at_bottom());
    }

    #[test]
    fn test_content_that_fits_is_at_bottom() {
        let mut scroll = ScrollState::new();
        assert!(scroll.at_bottom());
        scroll.update_dimensions(3, 10);
        assert!(scroll.at_bottom());
        assert!(!scroll.needs_scrollbar());
    }

    #[test]
    fn test_visible_range() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(100, 10);
        scroll.scroll_to_bottom();

        assert_eq!(scroll.visible_range(), (90, 100));

        scroll.scroll_to_top();
        assert_eq!(scroll.visible_range(), (0, 10));
    }
}
