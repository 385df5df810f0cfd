use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::error::Result;
use crate::mirror::{Applied, LoadMode};
use crate::sync::{Feed, Synchronizer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollerState {
    Idle,
    Polling,
}

/// Drives a [`Synchronizer`]: one initial load, then a silent refresh every
/// `interval` for as long as the task runs. Failures are logged and the
/// cycle carries on unchanged.
pub struct Poller<F: Feed> {
    sync: Arc<Synchronizer<F>>,
    interval: Duration,
}

impl<F: Feed + 'static> Poller<F> {
    pub fn new(sync: Arc<Synchronizer<F>>, interval: Duration) -> Self {
        Self { sync, interval }
    }

    /// One background poll, without any timer.
    pub async fn tick(&self) -> Result<Applied> {
        self.sync.refresh(LoadMode::Silent).await
    }

    /// Spawn the poll loop on the current Tokio runtime.
    pub fn start(self) -> PollHandle {
        let Self { sync, interval } = self;
        info!(feed = F::NAME, ?interval, "poller started");
        let task = tokio::spawn(async move {
            // Errors are already logged and reflected in the view.
            let _ = sync.refresh(LoadMode::Initial).await;
            loop {
                tokio::time::sleep(interval).await;
                if let Err(e) = sync.refresh(LoadMode::Silent).await {
                    debug!(feed = F::NAME, error = %e, "poll failed");
                }
            }
        });
        PollHandle { task }
    }
}

/// Cancel handle for a running poll loop. Dropping it also stops the loop.
#[derive(Debug)]
pub struct PollHandle {
    task: JoinHandle<()>,
}

impl PollHandle {
    pub fn state(&self) -> PollerState {
        if self.task.is_finished() {
            PollerState::Idle
        } else {
            PollerState::Polling
        }
    }

    /// Stop polling. A request already in flight is abandoned; its response
    /// is never applied.
    pub fn cancel(self) {
        self.task.abort();
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
