//! Poll cadence and fetch gating
//!
//! Status polls run on a fixed timer. Log reads are chained eagerly when the
//! server says more data is coming *and* the last read actually returned
//! bytes; an empty read with `more_data` waits for the next status poll so a
//! running-but-quiet build doesn't turn into a tight request loop.

use super::cursor::LogChunk;
use std::time::Duration;
use tokio::time::{Interval, MissedTickBehavior};

/// Default time between status polls
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Whether a just-applied chunk warrants an immediate follow-up read
pub fn should_rechain(chunk: &LogChunk) -> bool {
    chunk.more_data && !chunk.is_empty()
}

/// Tracks outstanding requests so the timer never stacks them
#[derive(Debug)]
pub struct PollScheduler {
    interval: Duration,
    status_in_flight: bool,
    /// Build whose log read is outstanding (at most one at a time)
    log_in_flight: Option<u64>,
}

impl PollScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            status_in_flight: false,
            log_in_flight: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Timer driving status polls. The first tick completes immediately.
    pub fn ticker(&self) -> Interval {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker
    }

    /// Timer elapsed: returns true if a status poll should be issued
    ///
    /// A poll that is still outstanding absorbs the tick.
    pub fn on_tick(&mut self) -> bool {
        if self.status_in_flight {
            tracing::debug!("status poll still outstanding, skipping tick");
            return false;
        }
        self.status_in_flight = true;
        true
    }

    pub fn status_settled(&mut self) {
        self.status_in_flight = false;
    }

    /// Claim the log-read slot for `build`; false if one is already outstanding
    ///
    /// A read still running for an older build doesn't block the new build.
    /// Its result is stale and gets discarded by the tracker.
    pub fn begin_log(&mut self, build: u64) -> bool {
        if self.log_in_flight == Some(build) {
            return false;
        }
        self.log_in_flight = Some(build);
        true
    }

    pub fn log_settled(&mut self, build: u64) {
        if self.log_in_flight == Some(build) {
            self.log_in_flight = None;
        }
    }

    pub fn log_in_flight(&self) -> Option<u64> {
        self.log_in_flight
    }
}

impl Default for PollScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL)
    }
}
