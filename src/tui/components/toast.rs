//! Toast notification component
//!
//! A non-blocking overlay that auto-dismisses after a fixed duration.
//! Renders in the bottom-right corner on top of all other content.

use crate::text::ansi::printable_width;
use crate::tui::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};

/// How long a toast stays up
const TOAST_DURATION: Duration = Duration::from_secs(4);

/// A toast notification that auto-dismisses
pub struct Toast {
    pub message: String,
    created_at: Instant,
    duration: Duration,
}

impl Toast {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            created_at: Instant::now(),
            duration: TOAST_DURATION,
        }
    }

    /// Check if the toast has expired and should be removed
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.duration
    }

    /// Area the toast occupies inside `area`
    pub fn placement(&self, area: Rect) -> Rect {
        // 2 chars of padding each side plus the border
        let text_width = printable_width(&self.message).min(u16::MAX as usize) as u16;
        let width = text_width
            .saturating_add(4)
            .min(area.width.saturating_sub(4));
        let height = 3u16.min(area.height);

        // Bottom-right corner, offset by 2 cells from edge
        let x = area.right().saturating_sub(width + 2).max(area.x);
        let y = area.bottom().saturating_sub(height + 2).max(area.y);

        Rect::new(x, y, width, height)
    }

    /// Render the toast, clearing whatever is underneath
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let toast_area = self.placement(area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.failure))
            .style(Style::default().bg(theme.bg));

        let text = Paragraph::new(self.message.as_str())
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.fg))
            .block(block);

        f.render_widget(Clear, toast_area);
        f.render_widget(text, toast_area);
    }
}
