// Task execution - turns reducer output into network requests and view updates
//
// Fetches run as independent tokio tasks and report back through the event
// channel, so a slow request never blocks input handling or redraws. The
// reducer stays the only place state changes.

use super::{LogSync, Request, Shutdown, SyncEvent, Task};
use crate::jenkins::{FetchError, JenkinsClient};
use tokio::sync::mpsc;
use tokio::task::JoinSet;

/// Whatever displays the synchronized log (terminal UI or plain stdout)
pub trait Frontend {
    /// Buffer or status changed
    fn refresh(&mut self, sync: &LogSync);

    /// Recoverable failure worth showing; the next poll retries
    fn report(&mut self, error: &FetchError);
}

/// Spawns fetches and owns their handles
pub struct TaskRunner {
    client: JenkinsClient,
    events: mpsc::UnboundedSender<SyncEvent>,
    inflight: JoinSet<()>,
}

impl TaskRunner {
    pub fn new(client: JenkinsClient, events: mpsc::UnboundedSender<SyncEvent>) -> Self {
        Self {
            client,
            events,
            inflight: JoinSet::new(),
        }
    }

    /// Reduce `event` and carry out the resulting tasks
    ///
    /// Returns the shutdown reason once the loop should stop.
    pub fn dispatch<F: Frontend>(
        &mut self,
        sync: &mut LogSync,
        event: SyncEvent,
        frontend: &mut F,
    ) -> Option<Shutdown> {
        self.reap();

        for task in sync.reduce(event) {
            match task {
                Task::FetchStatus => self.spawn_status(),
                Task::FetchLog { build, offset } => self.spawn_log(build, offset),
                Task::RefreshView => frontend.refresh(sync),
                Task::ReportError(error) => frontend.report(&error),
                Task::Shutdown(reason) => {
                    self.abort_all();
                    return Some(reason);
                }
            }
        }
        None
    }

    pub fn spawn_status(&mut self) {
        let client = self.client.clone();
        let events = self.events.clone();

        self.inflight.spawn(async move {
            let event = match client.fetch_status().await {
                Ok(snapshot) => SyncEvent::StatusReceived(snapshot),
                Err(error) => SyncEvent::FetchFailed {
                    request: Request::Status,
                    error,
                },
            };
            // Receiver gone means the loop already exited
            let _ = events.send(event);
        });
    }

    pub fn spawn_log(&mut self, build: u64, offset: u64) {
        let client = self.client.clone();
        let events = self.events.clone();

        self.inflight.spawn(async move {
            let event = match client.fetch_log_chunk(build, offset).await {
                Ok(chunk) => SyncEvent::ChunkReceived { build, chunk },
                Err(error) => SyncEvent::FetchFailed {
                    request: Request::Log { build },
                    error,
                },
            };
            let _ = events.send(event);
        });
    }

    /// Cancel every outstanding request
    pub fn abort_all(&mut self) {
        if !self.inflight.is_empty() {
            tracing::debug!("Aborting {} outstanding request(s)", self.inflight.len());
        }
        self.inflight.abort_all();
    }

    #[cfg(test)]
    fn inflight(&self) -> usize {
        self.inflight.len()
    }

    /// Drop handles of tasks that already finished
    fn reap(&mut self) {
        while let Some(result) = self.inflight.try_join_next() {
            if let Err(e) = result {
                if e.is_panic() {
                    tracing::error!("Fetch task panicked: {}", e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jenkins::{BuildResult, ServerEndpoint, StatusSnapshot};
    use crate::sync::LogChunk;
    use std::time::Duration;

    #[derive(Default)]
    struct Recorder {
        refreshes: Vec<usize>,
        errors: Vec<FetchError>,
    }

    impl Frontend for Recorder {
        fn refresh(&mut self, sync: &LogSync) {
            self.refreshes
                .push(sync.tracker().buffer().map_or(0, |b| b.len()));
        }

        fn report(&mut self, error: &FetchError) {
            self.errors.push(error.clone());
        }
    }

    fn runner() -> (TaskRunner, mpsc::UnboundedReceiver<SyncEvent>) {
        // Port 9 (discard) is never served; nothing here awaits the requests
        let ep = ServerEndpoint::new("http://127.0.0.1:9/job/x", "", "");
        let client = JenkinsClient::new(ep, Duration::from_millis(50)).unwrap();
        let (tx, rx) = mpsc::unbounded_channel();
        (TaskRunner::new(client, tx), rx)
    }

    fn snapshot(build: u64) -> StatusSnapshot {
        StatusSnapshot {
            build,
            display_name: String::new(),
            started_at: None,
            result: BuildResult::Unknown,
            in_progress: true,
            building: true,
            estimated_duration_ms: 0,
        }
    }

    #[tokio::test]
    async fn test_dispatch_routes_view_tasks_to_frontend() {
        let (mut runner, _rx) = runner();
        let mut sync = LogSync::new(Duration::from_secs(5));
        let mut ui = Recorder::default();

        let out = runner.dispatch(&mut sync, SyncEvent::StatusReceived(snapshot(3)), &mut ui);
        assert!(out.is_none());
        assert_eq!(ui.refreshes, vec![0]);
        // Log read for the new build was spawned
        assert_eq!(runner.inflight(), 1);

        let chunk = LogChunk {
            start: 0,
            text: "hello\n".into(),
            more_data: false,
            new_offset: 6,
        };
        runner.dispatch(&mut sync, SyncEvent::ChunkReceived { build: 3, chunk }, &mut ui);
        assert_eq!(ui.refreshes, vec![0, 6]);

        let error = FetchError::Transport("connection refused".into());
        runner.dispatch(
            &mut sync,
            SyncEvent::FetchFailed {
                request: Request::Status,
                error: error.clone(),
            },
            &mut ui,
        );
        assert_eq!(ui.errors, vec![error]);

        runner.abort_all();
    }

    #[tokio::test]
    async fn test_quit_aborts_outstanding_requests() {
        let (mut runner, _rx) = runner();
        let mut sync = LogSync::new(Duration::from_secs(5));
        let mut ui = Recorder::default();

        runner.dispatch(&mut sync, SyncEvent::Tick, &mut ui);
        assert_eq!(runner.inflight(), 1);

        let out = runner.dispatch(&mut sync, SyncEvent::Quit, &mut ui);
        assert_eq!(out, Some(Shutdown::Requested));
    }

    #[tokio::test]
    async fn test_failed_fetch_reports_back_through_channel() {
        let (mut runner, mut rx) = runner();
        runner.spawn_status();

        let event = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert!(matches!(
            event,
            SyncEvent::FetchFailed {
                request: Request::Status,
                error: FetchError::Transport(_)
            }
        ));
    }
}
