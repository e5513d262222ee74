// TUI module - Terminal User Interface
//
// Sets up the terminal, runs the event loop and restores the terminal on the
// way out. The loop multiplexes four sources:
// - the poll ticker (status polls)
// - fetch results coming back from the task runner
// - terminal input (keys, mouse, resize)
// - a redraw timer for the spinner and toast expiry

pub mod ansi;
pub mod app;
pub mod components;
pub mod scroll;
pub mod theme;
pub mod ui;
pub mod viewport;

use crate::config::Config;
use crate::jenkins::JenkinsClient;
use crate::logging::LogBuffer;
use crate::sync::{LogSync, Shutdown, SyncEvent, TaskRunner};
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

/// Redraw cadence for the spinner and elapsed time
const REDRAW_INTERVAL: Duration = Duration::from_millis(250);

/// Run the TUI until the user quits or a fetch fails fatally
pub async fn run_tui(client: JenkinsClient, config: &Config, log_buffer: LogBuffer) -> Result<Shutdown> {
    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::new(config.wrap.clone(), log_buffer);
    let result = run_event_loop(&mut terminal, &mut app, client, config.poll_interval()).await;

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    client: JenkinsClient,
    poll_interval: Duration,
) -> Result<Shutdown> {
    let job_url = client.endpoint().job_url.clone();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut sync = LogSync::new(poll_interval);
    let mut runner = TaskRunner::new(client, tx);

    let mut ticker = sync.scheduler().ticker();
    let mut redraw = tokio::time::interval(REDRAW_INTERVAL);
    let mut input = EventStream::new();

    loop {
        terminal
            .draw(|f| ui::draw(f, app, &sync, &job_url))
            .context("Failed to draw terminal")?;

        let event = tokio::select! {
            _ = ticker.tick() => Some(SyncEvent::Tick),

            Some(event) = rx.recv() => Some(event),

            maybe_input = input.next() => match maybe_input {
                Some(Ok(Event::Key(key))) => app.handle_key(key),
                Some(Ok(Event::Mouse(mouse))) => {
                    app.handle_mouse(mouse);
                    None
                }
                // Resize is picked up by the next draw
                Some(Ok(_)) => None,
                Some(Err(e)) => {
                    tracing::warn!("Terminal input error: {}", e);
                    None
                }
                None => Some(SyncEvent::Quit),
            },

            _ = redraw.tick() => {
                app.tick_animation();
                None
            }
        };

        if let Some(event) = event {
            if let Some(reason) = runner.dispatch(&mut sync, event, app) {
                return Ok(reason);
            }
        }
    }
}
