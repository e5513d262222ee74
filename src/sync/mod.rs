// Log synchronization core
//
// Everything that decides *what* to fetch and *when* lives here, free of I/O:
//
// - cursor:    progressive-read result shape and read position
// - tracker:   build-change detection, per-build cursor/buffer
// - scheduler: poll cadence and re-fetch gating
// - runner:    executes fetch tasks and feeds results back as events
//
// The event loop folds each `SyncEvent` through `LogSync::reduce`, which
// returns `Task`s describing side effects instead of performing them. Only
// one event is reduced at a time, so the buffer and cursor need no locks.

mod cursor;
mod runner;
mod scheduler;
mod tracker;

pub use cursor::LogChunk;
pub use runner::{Frontend, TaskRunner};
pub use tracker::{BuildBuffer, BuildTracker};

use scheduler::{should_rechain, PollScheduler};
use tracker::{ChunkOutcome, Observation};

use crate::jenkins::{FetchError, StatusSnapshot};
use std::fmt;
use std::time::Duration;

/// Which request a failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    Status,
    Log { build: u64 },
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status => write!(f, "status poll"),
            Self::Log { build } => write!(f, "log read for build #{}", build),
        }
    }
}

/// Everything the event loop can deliver
#[derive(Debug, Clone, PartialEq)]
pub enum SyncEvent {
    /// Poll timer elapsed
    Tick,
    StatusReceived(StatusSnapshot),
    ChunkReceived { build: u64, chunk: LogChunk },
    FetchFailed { request: Request, error: FetchError },
    /// User asked to leave
    Quit,
}

/// Why the loop is ending
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shutdown {
    Requested,
    Fatal(FetchError),
}

/// Side effect requested by the reducer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    FetchStatus,
    FetchLog { build: u64, offset: u64 },
    /// Buffer changed; push it to the view
    RefreshView,
    /// Recoverable failure to surface transiently
    ReportError(FetchError),
    Shutdown(Shutdown),
}

/// Synchronization state: tracked build, poll bookkeeping, latest snapshot
#[derive(Debug)]
pub struct LogSync {
    tracker: BuildTracker,
    scheduler: PollScheduler,
    snapshot: Option<StatusSnapshot>,
    last_error: Option<FetchError>,
    finished: bool,
}

impl LogSync {
    pub fn new(poll_interval: Duration) -> Self {
        Self {
            tracker: BuildTracker::new(),
            scheduler: PollScheduler::new(poll_interval),
            snapshot: None,
            last_error: None,
            finished: false,
        }
    }

    pub fn tracker(&self) -> &BuildTracker {
        &self.tracker
    }

    pub fn scheduler(&self) -> &PollScheduler {
        &self.scheduler
    }

    /// Latest successfully decoded status
    pub fn snapshot(&self) -> Option<&StatusSnapshot> {
        self.snapshot.as_ref()
    }

    /// Most recent recoverable failure, cleared by the next successful poll
    pub fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Fold one event into the state and describe the follow-up work
    pub fn reduce(&mut self, event: SyncEvent) -> Vec<Task> {
        if self.finished {
            return Vec::new();
        }

        match event {
            SyncEvent::Tick => {
                if self.scheduler.on_tick() {
                    vec![Task::FetchStatus]
                } else {
                    Vec::new()
                }
            }
            SyncEvent::StatusReceived(snapshot) => self.on_status(snapshot),
            SyncEvent::ChunkReceived { build, chunk } => self.on_chunk(build, chunk),
            SyncEvent::FetchFailed { request, error } => self.on_failure(request, error),
            SyncEvent::Quit => {
                self.finished = true;
                vec![Task::Shutdown(Shutdown::Requested)]
            }
        }
    }

    fn on_status(&mut self, snapshot: StatusSnapshot) -> Vec<Task> {
        self.scheduler.status_settled();
        self.last_error = None;

        let mut tasks = Vec::new();

        if let Observation::Started { previous } = self.tracker.observe(snapshot.build) {
            match previous {
                Some(prev) => tracing::info!(
                    "Build changed #{} -> #{}, resetting log",
                    prev,
                    snapshot.build
                ),
                None => tracing::info!("Tracking build #{}", snapshot.build),
            }
            tasks.push(Task::RefreshView);
        }

        self.snapshot = Some(snapshot);

        // Same build: only the last read's more_data decides
        if self.tracker.cursor().is_some_and(|c| c.more_data) {
            tasks.extend(self.next_log_read());
        }

        tasks
    }

    fn on_chunk(&mut self, build: u64, chunk: LogChunk) -> Vec<Task> {
        self.scheduler.log_settled(build);

        match self.tracker.apply(build, &chunk) {
            ChunkOutcome::Applied => {
                let mut tasks = Vec::new();
                if !chunk.is_empty() {
                    tasks.push(Task::RefreshView);
                }
                if should_rechain(&chunk) {
                    tasks.extend(self.next_log_read());
                }
                tasks
            }
            ChunkOutcome::Stale => {
                tracing::debug!(
                    "Dropping {} bytes read for superseded build #{}",
                    chunk.text.len(),
                    build
                );
                Vec::new()
            }
            ChunkOutcome::OutOfOrder => {
                tracing::warn!(
                    "Dropping out-of-order chunk for build #{} (start {}, cursor {:?})",
                    build,
                    chunk.start,
                    self.tracker.cursor().map(|c| c.offset)
                );
                Vec::new()
            }
        }
    }

    fn on_failure(&mut self, request: Request, error: FetchError) -> Vec<Task> {
        match request {
            Request::Status => self.scheduler.status_settled(),
            Request::Log { build } => self.scheduler.log_settled(build),
        }

        if error.is_fatal() {
            tracing::error!("{} failed: {}", request, error);
            self.finished = true;
            return vec![Task::Shutdown(Shutdown::Fatal(error))];
        }

        // Retried at the next tick or chained read, never here
        tracing::warn!("{} failed: {}", request, error);
        self.last_error = Some(error.clone());
        vec![Task::ReportError(error)]
    }

    fn next_log_read(&mut self) -> Option<Task> {
        let tracked = self.tracker.current()?;
        let build = tracked.id();
        let offset = tracked.cursor.offset;

        if !self.scheduler.begin_log(build) {
            return None;
        }
        Some(Task::FetchLog { build, offset })
    }
}
