//! Background polling loop.
//!
//! On every tick the poller fetches a reading for each configured patient,
//! feeds the result into the [`Store`], then expires entries older than the
//! retention window. Fetches happen outside the store lock; a failed fetch
//! is simply retried on the next tick.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

use gaitwatch_types::PatientId;

use crate::data::duration::format_duration;
use crate::data::{IngestOutcome, Store};
use crate::source::SampleSource;

/// Default delay between polls (five polls per second).
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Default retention window (ten minutes).
pub const DEFAULT_RETENTION: Duration = Duration::from_secs(600);

/// Counts of what happened during one poll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollSummary {
    pub created: usize,
    pub appended: usize,
    pub smoothed: usize,
    pub skipped: usize,
    pub expired: usize,
}

impl PollSummary {
    fn record(&mut self, outcome: IngestOutcome) {
        match outcome {
            IngestOutcome::Created => self.created += 1,
            IngestOutcome::Appended => self.appended += 1,
            IngestOutcome::Smoothed => self.smoothed += 1,
            IngestOutcome::Skipped => self.skipped += 1,
        }
    }

    /// Number of patients that returned data.
    pub fn succeeded(&self) -> usize {
        self.created + self.appended + self.smoothed
    }
}

/// Periodically fetches readings for a fixed set of patients.
#[derive(Debug)]
pub struct Poller {
    source: Arc<dyn SampleSource>,
    store: Store,
    patients: Vec<PatientId>,
    interval: Duration,
    retention: Duration,
}

impl Poller {
    /// Create a poller with the default interval and retention window.
    pub fn new(source: Arc<dyn SampleSource>, store: Store, patients: Vec<PatientId>) -> Self {
        Self {
            source,
            store,
            patients,
            interval: DEFAULT_POLL_INTERVAL,
            retention: DEFAULT_RETENTION,
        }
    }

    /// Set the delay between polls.
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Set how long entries are kept.
    pub fn retention(mut self, retention: Duration) -> Self {
        self.retention = retention;
        self
    }

    /// Fetch every patient once, ingest the results, then expire.
    pub async fn poll_once(&self) -> PollSummary {
        let mut summary = PollSummary::default();

        for &id in &self.patients {
            let outcome = self.source.fetch(id).await;
            summary.record(self.store.ingest(id, outcome));
        }

        summary.expired = self.store.expire(self.retention);
        summary
    }

    /// Poll until `shutdown` becomes `true` or its sender is dropped.
    ///
    /// A poll in progress is abandoned at its next await point when shutdown
    /// is requested. Each ingest is applied under the store lock without
    /// awaiting, so an abandoned poll never leaves a record half-updated.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!(
            source = self.source.description(),
            patients = self.patients.len(),
            interval = %format_duration(self.interval),
            retention = %format_duration(self.retention),
            "poller started"
        );

        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = stop_requested(&mut shutdown) => break,
            }

            tokio::select! {
                summary = self.poll_once() => {
                    debug!(?summary, buffered = self.store.total_entries(), "poll complete");
                }
                _ = stop_requested(&mut shutdown) => {
                    debug!("poll abandoned for shutdown");
                    break;
                }
            }
        }

        info!("poller stopped");
    }

    /// Run the poller as a background task on the current tokio runtime.
    pub fn spawn(self) -> PollerHandle {
        let (tx, rx) = watch::channel(false);
        let task = tokio::spawn(self.run(rx));
        PollerHandle { shutdown: tx, task }
    }
}

/// Resolves once shutdown is signalled or the sender is gone.
async fn stop_requested(shutdown: &mut watch::Receiver<bool>) {
    loop {
        if *shutdown.borrow_and_update() {
            return;
        }
        if shutdown.changed().await.is_err() {
            return;
        }
    }
}

/// Handle to a spawned [`Poller`].
#[derive(Debug)]
pub struct PollerHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Ask the poller to stop and wait for the task to exit.
    ///
    /// Outstanding fetches are dropped rather than awaited.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        let _ = self.task.await;
    }
}
