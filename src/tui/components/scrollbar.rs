//! Scrollbar for the console body
//!
//! Hidden while the whole log fits; the thumb is dimmed while following so a
//! detached view stands out.

use crate::tui::scroll::ScrollState;
use crate::tui::theme::Theme;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

/// Render a vertical scrollbar on the right edge of `area`
pub fn render_scrollbar(f: &mut Frame, area: Rect, scroll: &ScrollState, theme: &Theme) {
    if !scroll.needs_scrollbar() {
        return;
    }

    let thumb = if scroll.at_bottom() {
        theme.muted
    } else {
        theme.highlight
    };

    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(Some("↑"))
        .end_symbol(Some("↓"))
        .thumb_style(Style::default().fg(thumb));

    // Positions run over the scrollable range, not the line count
    let content_length = scroll.total().saturating_sub(scroll.viewport());
    let mut scrollbar_state = ScrollbarState::new(content_length).position(scroll.offset());

    f.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
}
