// Headless mode - stream the console log to stdout
//
// Same synchronization loop as the TUI, without a terminal. New chunks are
// written as soon as they are applied; a banner line marks each new build.
// Diagnostics go to stderr through the tracing fmt layer.

use crate::jenkins::{FetchError, JenkinsClient};
use crate::sync::{Frontend, LogSync, Shutdown, SyncEvent, TaskRunner};
use std::io::Write;
use std::time::Duration;
use tokio::sync::mpsc;

/// Writes applied chunks to a byte sink, each exactly once
pub struct StreamPrinter<W: Write> {
    out: W,
    build: Option<u64>,
    /// Log offset of `build` written up to
    written: u64,
}

impl<W: Write> StreamPrinter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            build: None,
            written: 0,
        }
    }

    fn flush_new(&mut self, sync: &LogSync) -> std::io::Result<()> {
        let Some(buffer) = sync.tracker().buffer() else {
            return Ok(());
        };

        if self.build != Some(buffer.build()) {
            if self.build.is_some() {
                writeln!(self.out)?;
            }
            writeln!(self.out, "--- Build #{} ---", buffer.build())?;
            self.build = Some(buffer.build());
            self.written = 0;
        }

        for (span, text) in buffer.chunks() {
            if span.start < self.written {
                continue;
            }
            self.out.write_all(text.as_bytes())?;
            self.written = span.end;
        }
        self.out.flush()
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Frontend for StreamPrinter<W> {
    fn refresh(&mut self, sync: &LogSync) {
        if let Err(e) = self.flush_new(sync) {
            tracing::warn!("Failed to write log output: {}", e);
        }
    }

    fn report(&mut self, _error: &FetchError) {
        // Already logged to stderr by the reducer
    }
}

/// Run until Ctrl-C or a fatal fetch error
pub async fn run_headless(client: JenkinsClient, poll_interval: Duration) -> Shutdown {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut sync = LogSync::new(poll_interval);
    let mut runner = TaskRunner::new(client, tx);
    let mut ticker = sync.scheduler().ticker();
    let mut printer = StreamPrinter::new(std::io::stdout());

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    tracing::info!("TUI disabled, streaming to stdout");

    loop {
        let event = tokio::select! {
            _ = ticker.tick() => SyncEvent::Tick,
            Some(event) = rx.recv() => event,
            _ = &mut ctrl_c => SyncEvent::Quit,
        };

        if let Some(reason) = runner.dispatch(&mut sync, event, &mut printer) {
            return reason;
        }
    }
}
