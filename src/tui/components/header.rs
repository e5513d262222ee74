// Header component
//
// Build number, display name, result (or a spinner while running), start
// time and elapsed time of the tracked build.

use crate::jenkins::StatusSnapshot;
use crate::sync::LogSync;
use crate::tui::app::App;
use crate::tui::theme::Theme;
use chrono::{DateTime, Local, Utc};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the header at the top of the screen
pub fn render(f: &mut Frame, area: Rect, app: &App, sync: &LogSync, job_url: &str) {
    let line = match sync.snapshot() {
        Some(snapshot) => build_line(snapshot, app.spinner_char(), &app.theme, Utc::now()),
        None => Line::from(vec![
            Span::styled(
                format!(" {} ", app.spinner_char()),
                Style::default().fg(app.theme.running),
            ),
            Span::raw(format!("Waiting for job status from {}", job_url)),
        ]),
    };

    let header = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.title))
            .title(" jenkins-tail "),
    );

    f.render_widget(header, area);
}

/// Styled summary of one build
fn build_line(
    snapshot: &StatusSnapshot,
    spinner: char,
    theme: &Theme,
    now: DateTime<Utc>,
) -> Line<'static> {
    let mut spans = vec![Span::styled(
        format!(" #{} ", snapshot.build),
        Style::default()
            .fg(theme.title)
            .add_modifier(Modifier::BOLD),
    )];

    if !snapshot.display_name.is_empty() {
        spans.push(Span::raw(format!("{} ", snapshot.display_name)));
    }
    spans.push(Span::styled("│ ", Style::default().fg(theme.muted)));

    if snapshot.is_running() {
        spans.push(Span::styled(
            format!("{} RUNNING", spinner),
            Style::default().fg(theme.running),
        ));
    } else {
        spans.push(Span::styled(
            snapshot.result.to_string(),
            Style::default()
                .fg(theme.result_color(snapshot.result))
                .add_modifier(Modifier::BOLD),
        ));
    }

    if let Some(started) = snapshot.started_at {
        spans.push(Span::styled(" │ ", Style::default().fg(theme.muted)));
        spans.push(Span::raw(format!(
            "started {}",
            started.with_timezone(&Local).format("%H:%M:%S")
        )));

        if snapshot.is_running() {
            spans.push(Span::styled(" │ ", Style::default().fg(theme.muted)));
            spans.push(Span::raw(format!(
                "elapsed {}",
                format_elapsed((now - started).num_seconds())
            )));
        }
    }

    Line::from(spans)
}

/// `HH:MM:SS`, clamped at zero for clocks that disagree
pub fn format_elapsed(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}
