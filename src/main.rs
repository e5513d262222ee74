// jenkins-tail - live console log of the latest Jenkins build
//
// Follows a job's most recent build: polls its status on a fixed cadence,
// reads the console output progressively and shows it word-wrapped in the
// terminal. When a new build starts the view switches to it.
//
// Architecture:
// - Jenkins client (reqwest): status polls and progressive log reads
// - Sync core: reducer over fetch results, task runner for the requests
// - Text: ANSI-aware word wrapping
// - TUI (ratatui): header, log body, System Logs pane, status bar
// - Headless mode: the same loop streaming to stdout

mod cli;
mod config;
mod headless;
mod jenkins;
mod logging;
mod startup;
mod sync;
mod text;
mod tui;

use anyhow::Result;
use clap::Parser;
use config::Config;
use jenkins::JenkinsClient;
use logging::{LogBuffer, TuiLogLayer};
use sync::Shutdown;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Subcommands (config --show, --path) print and exit
    if let Some(command) = &cli.command {
        std::process::exit(cli::handle_command(command, &cli.run));
    }

    let mut config = Config::from_env();
    config.apply_cli(&cli.run);

    let log_buffer = LogBuffer::new();
    // Must stay alive until exit so buffered file logs get flushed
    let _file_guard = init_tracing(&config, &log_buffer);

    let endpoint = config.endpoint()?;
    let client = JenkinsClient::new(endpoint.clone(), config.request_timeout())?;

    // Preflight: bad credentials end the run before the terminal is touched
    let snapshot = match client.fetch_status().await {
        Ok(snapshot) => Some(snapshot),
        Err(e) if e.is_fatal() => anyhow::bail!("{}", e),
        Err(e) => {
            tracing::warn!("Preflight status fetch failed: {}", e);
            None
        }
    };

    startup::print_startup(&config, &endpoint, snapshot.as_ref());
    startup::log_startup(&endpoint, snapshot.as_ref());

    let shutdown = if config.enable_tui {
        tui::run_tui(client, &config, log_buffer).await?
    } else {
        headless::run_headless(client, config.poll_interval()).await
    };

    match shutdown {
        Shutdown::Requested => {
            tracing::info!("Shutting down");
            Ok(())
        }
        Shutdown::Fatal(e) => anyhow::bail!("{}", e),
    }
}

/// Install the tracing subscriber
///
/// TUI mode captures events into `log_buffer` (shown in the System Logs pane)
/// so nothing garbles the alternate screen; headless mode writes to stderr and
/// leaves stdout to the console log. File logging is optional JSON output on
/// top of either.
///
/// Precedence: RUST_LOG env var > config file > default "info"
fn init_tracing(
    config: &Config,
    log_buffer: &LogBuffer,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.logging.filter_directive().into());

    let tui_layer = config
        .enable_tui
        .then(|| TuiLogLayer::new(log_buffer.clone()));
    let stderr_layer = (!config.enable_tui)
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    let (file_layer, guard) = match file_writer(config) {
        Some((writer, guard)) => (
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(writer)
                    .with_ansi(false),
            ),
            Some(guard),
        ),
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tui_layer)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}

/// Rolling non-blocking writer for file logging, if enabled and usable
fn file_writer(
    config: &Config,
) -> Option<(
    tracing_appender::non_blocking::NonBlocking,
    tracing_appender::non_blocking::WorkerGuard,
)> {
    let logging = &config.logging;
    if !logging.file_enabled {
        return None;
    }

    if let Err(e) = std::fs::create_dir_all(&logging.file_dir) {
        // Subscriber isn't installed yet
        eprintln!(
            "Warning: Could not create log directory {:?}: {}",
            logging.file_dir, e
        );
        return None;
    }

    let appender = logging
        .file_rotation
        .appender(&logging.file_dir, &logging.file_prefix);

    Some(tracing_appender::non_blocking(appender))
}
