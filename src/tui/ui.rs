// UI rendering
//
// Called on every frame. Layout, top to bottom:
// - Header (build summary)
// - Console body (wrapped build output, scrollbar when it overflows)
// - System Logs pane (toggled with `l`)
// - Status bar
// The error toast is drawn last, over everything else.

use super::app::App;
use super::components::{header, logs_panel, scrollbar::render_scrollbar, status_bar};
use crate::sync::LogSync;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Height of the System Logs pane when shown
const LOGS_PANE_HEIGHT: u16 = 8;

/// Main UI render function
pub fn draw(f: &mut Frame, app: &mut App, sync: &LogSync, job_url: &str) {
    let mut constraints = vec![
        Constraint::Length(3), // Header
        Constraint::Min(3),    // Console body
    ];
    if app.show_logs {
        constraints.push(Constraint::Length(LOGS_PANE_HEIGHT));
    }
    constraints.push(Constraint::Length(2)); // Status bar

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());

    header::render(f, chunks[0], app, sync, job_url);
    render_console(f, chunks[1], app);

    if app.show_logs {
        logs_panel::render(f, chunks[2], &app.log_buffer, &app.theme);
    }
    status_bar::render(f, chunks[chunks.len() - 1], app, sync);

    if let Some(toast) = &app.toast {
        let area = f.area();
        toast.render(f, area, &app.theme);
    }
}

/// Console body: resize the viewport to the frame, then draw its window
fn render_console(f: &mut Frame, area: Rect, app: &mut App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border))
        .title(" Console ");
    let inner = block.inner(area);

    // Last column is reserved for the scrollbar
    app.viewport.resize(
        inner.width.saturating_sub(1) as usize,
        inner.height as usize,
    );

    let body = Paragraph::new(app.viewport.visible_lines().to_vec()).block(block);
    f.render_widget(body, area);

    render_scrollbar(f, inner, app.viewport.scroll(), &app.theme);
}
