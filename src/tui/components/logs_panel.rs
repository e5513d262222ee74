//! System Logs pane
//!
//! Shows the most recent tracing events captured by `TuiLogLayer`, newest at
//! the bottom, color-coded by level. Toggled with `l`.

use crate::logging::{LogBuffer, LogEntry, LogLevel};
use crate::tui::theme::Theme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Render the pane with as many recent entries as fit
pub fn render(f: &mut Frame, area: Rect, log_buffer: &LogBuffer, theme: &Theme) {
    let height = area.height.saturating_sub(2) as usize;
    let entries = log_buffer.recent(height);

    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| {
            let mut style = Style::default().fg(theme.log_level_color(entry.level));
            if entry.level == LogLevel::Error {
                style = style.add_modifier(Modifier::BOLD);
            }
            ListItem::new(format_log_entry(entry)).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(" System Logs "),
    );

    f.render_widget(list, area);
}

/// Format a log entry for display
///
/// Debug and trace entries also name their module.
fn format_log_entry(entry: &LogEntry) -> String {
    match entry.level {
        LogLevel::Debug | LogLevel::Trace => format!(
            "[{}] {:5} {}: {}",
            entry.timestamp.format("%H:%M:%S"),
            entry.level.as_str(),
            entry.target,
            entry.message
        ),
        _ => format!(
            "[{}] {:5} {}",
            entry.timestamp.format("%H:%M:%S"),
            entry.level.as_str(),
            entry.message
        ),
    }
}
