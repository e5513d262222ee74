// Status bar component
//
// Read position of the tracked build, poll cadence, follow state and key
// hints. Hints are dropped first on narrow terminals.

use crate::sync::LogSync;
use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Below this width only the status fields are shown
const HINTS_MIN_WIDTH: u16 = 100;

const HINTS: &str = "↑↓/jk scroll  PgUp/PgDn  g/G top/end  l logs  q quit";

/// Render the status bar at the bottom of the screen
pub fn render(f: &mut Frame, area: Rect, app: &App, sync: &LogSync) {
    let total = app.viewport.line_count();
    let scroll = app.viewport.scroll();
    let position = (scroll.offset() + scroll.viewport()).min(total);
    let text = status_text(sync, app.following(), position, total, area.width);

    let status = Paragraph::new(text)
        .style(Style::default().fg(app.theme.status_bar))
        .block(Block::default().borders(Borders::TOP));

    f.render_widget(status, area);
}

fn status_text(sync: &LogSync, following: bool, position: usize, total: usize, width: u16) -> String {
    let read = match sync.tracker().cursor() {
        Some(cursor) => format!(
            "offset {} │ {}{}",
            cursor.offset,
            if cursor.more_data { "more data" } else { "complete" },
            // A log read is outstanding
            if sync.scheduler().log_in_flight().is_some() { " ⇣" } else { "" }
        ),
        None => "no build".to_string(),
    };

    let follow = if following { "FOLLOW" } else { "SCROLL" };

    let mut text = format!(
        " {} │ poll {}s │ {} {}/{}",
        read,
        sync.scheduler().interval().as_secs(),
        follow,
        position,
        total
    );

    if width >= HINTS_MIN_WIDTH {
        text.push_str(" │ ");
        text.push_str(HINTS);
    }
    text
}
