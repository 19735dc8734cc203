//! Sync orchestrator state machine.

use crate::checker::ConsistencyChecker;
use crate::client::{Acknowledgement, NotificationSink, ProcessingSystemClient, SourceSystemClient};
use crate::config::SyncConfig;
use crate::error::{SyncError, SyncResult};
use crate::observer::{SyncEvent, SyncObserver, TracingObserver};
use parking_lot::RwLock;
use recordsync_protocol::{RecordSet, SyncOutcome};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// The current state of the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// No run has been requested yet.
    Idle,
    /// Fetching a snapshot from the source system.
    Fetching,
    /// Submitting the snapshot to the processing system.
    Submitting,
    /// Comparing the submitted and returned record sets.
    Verifying,
    /// Sending the completion notification.
    Notifying,
    /// The last run succeeded.
    Completed,
    /// The last run was aborted.
    Failed,
}

impl SyncState {
    /// Returns true if a run is in progress.
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            SyncState::Fetching
                | SyncState::Submitting
                | SyncState::Verifying
                | SyncState::Notifying
        )
    }

    /// Returns true if a new run can start.
    pub fn can_start_sync(&self) -> bool {
        matches!(
            self,
            SyncState::Idle | SyncState::Completed | SyncState::Failed
        )
    }

    /// Returns true for the end states of a run.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SyncState::Completed | SyncState::Failed)
    }
}

/// Per-orchestrator counters.
#[derive(Debug, Clone, Default)]
pub struct SyncStats {
    /// Runs accepted.
    pub runs_started: u64,
    /// Runs that ended in `Completed`.
    pub runs_completed: u64,
    /// Runs that ended in `Failed`.
    pub runs_failed: u64,
    /// Records synchronized across completed runs.
    pub records_synchronized: u64,
    /// Completed runs whose notification could not be delivered.
    pub notifications_failed: u64,
    /// Reason of the most recent failed run.
    pub last_error: Option<String>,
    /// When the most recent run completed.
    pub last_completed: Option<Instant>,
}

/// What happened to the completion notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationStatus {
    /// The sink accepted the message.
    Delivered(Acknowledgement),
    /// The sink could not deliver the message.
    Failed(String),
    /// Notifications are disabled in the configuration.
    Skipped,
}

impl NotificationStatus {
    /// Returns true if the message was delivered.
    pub fn is_delivered(&self) -> bool {
        matches!(self, NotificationStatus::Delivered(_))
    }
}

/// Detailed result of a successful run.
#[derive(Debug, Clone)]
pub struct SyncReport {
    /// Completion message.
    pub message: String,
    /// Record set returned by the processing system.
    pub records: RecordSet,
    /// Notification delivery result.
    pub notification: NotificationStatus,
    /// Wall-clock duration of the run.
    pub duration: Duration,
}

impl SyncReport {
    /// Converts the report into a success outcome.
    pub fn into_outcome(self) -> SyncOutcome {
        SyncOutcome::success(self.message, self.records)
    }
}

/// Builds the completion message for `count` synchronized records.
pub fn success_message(count: usize) -> String {
    format!("{count} records synchronized successfully.")
}

/// Drives fetch, submit, verify and notify, in that order.
///
/// Each stage's output is the next stage's input, so stages never overlap.
/// A collaborator failure or a consistency violation aborts the run; a
/// notification failure does not.
pub struct SyncOrchestrator<S, P, N>
where
    S: SourceSystemClient,
    P: ProcessingSystemClient,
    N: NotificationSink,
{
    config: SyncConfig,
    source: Arc<S>,
    processor: Arc<P>,
    notifier: Arc<N>,
    checker: ConsistencyChecker,
    observer: Arc<dyn SyncObserver>,
    state: RwLock<SyncState>,
    stats: RwLock<SyncStats>,
}

impl<S, P, N> SyncOrchestrator<S, P, N>
where
    S: SourceSystemClient,
    P: ProcessingSystemClient,
    N: NotificationSink,
{
    /// Creates a new orchestrator reporting through [`TracingObserver`].
    pub fn new(config: SyncConfig, source: S, processor: P, notifier: N) -> Self {
        let checker = ConsistencyChecker::new(config.check_mode);
        Self {
            config,
            source: Arc::new(source),
            processor: Arc::new(processor),
            notifier: Arc::new(notifier),
            checker,
            observer: Arc::new(TracingObserver),
            state: RwLock::new(SyncState::Idle),
            stats: RwLock::new(SyncStats::default()),
        }
    }

    /// Replaces the observer.
    pub fn with_observer(mut self, observer: impl SyncObserver + 'static) -> Self {
        self.observer = Arc::new(observer);
        self
    }

    /// Gets the configuration.
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Gets the source client.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Gets the processing client.
    pub fn processor(&self) -> &P {
        &self.processor
    }

    /// Gets the notification sink.
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Gets the current state.
    pub fn state(&self) -> SyncState {
        *self.state.read()
    }

    /// Gets the current stats.
    pub fn stats(&self) -> SyncStats {
        self.stats.read().clone()
    }

    /// Runs one sync and returns its outcome.
    pub fn sync(&self) -> SyncOutcome {
        match self.run() {
            Ok(report) => report.into_outcome(),
            Err(e) => SyncOutcome::failure(e.to_string()),
        }
    }

    /// Runs one sync and returns a detailed report.
    ///
    /// Fails with [`SyncError::InvalidStateTransition`] if a run is already
    /// in progress on this orchestrator; the active run is not affected.
    pub fn run(&self) -> SyncResult<SyncReport> {
        let start = Instant::now();
        let _guard = self.begin()?;

        let original = self.source.fetch().map_err(|e| self.fail(e))?;
        self.emit(SyncEvent::Fetched {
            count: original.len(),
        });

        self.enter(SyncState::Submitting);
        let result = self.processor.submit(&original).map_err(|e| self.fail(e))?;
        self.emit(SyncEvent::Submitted {
            count: result.len(),
        });

        self.enter(SyncState::Verifying);
        let report = self.checker.check(&original, &result);
        if !report.is_consistent() {
            self.emit(SyncEvent::ConsistencyViolated(report.clone()));
            return Err(self.fail(SyncError::ConsistencyViolation(report)));
        }
        drop(original);

        self.enter(SyncState::Notifying);
        let message = success_message(result.len());
        let notification = self.deliver(&message);

        self.enter(SyncState::Completed);
        self.emit(SyncEvent::Completed {
            count: result.len(),
        });

        {
            let mut stats = self.stats.write();
            stats.runs_completed += 1;
            stats.records_synchronized += result.len() as u64;
            if matches!(notification, NotificationStatus::Failed(_)) {
                stats.notifications_failed += 1;
            }
            stats.last_completed = Some(Instant::now());
        }

        Ok(SyncReport {
            message,
            records: result,
            notification,
            duration: start.elapsed(),
        })
    }

    /// Moves from a startable state to `Fetching` in one step.
    fn begin(&self) -> SyncResult<RunGuard<'_, S, P, N>> {
        {
            let mut state = self.state.write();
            if !state.can_start_sync() {
                return Err(SyncError::InvalidStateTransition {
                    from: *state,
                    to: SyncState::Fetching,
                });
            }
            *state = SyncState::Fetching;
        }

        self.stats.write().runs_started += 1;
        self.emit(SyncEvent::RunStarted {
            source_endpoint: self.config.source_endpoint.clone(),
            processing_endpoint: self.config.processing_endpoint.clone(),
        });
        self.emit(SyncEvent::StageEntered(SyncState::Fetching));
        Ok(RunGuard { orchestrator: self })
    }

    /// Best-effort delivery of the completion message.
    fn deliver(&self, message: &str) -> NotificationStatus {
        if !self.config.notify_on_success {
            return NotificationStatus::Skipped;
        }

        match self.notifier.notify(message) {
            Ok(ack) => {
                self.emit(SyncEvent::NotificationDelivered(ack.clone()));
                NotificationStatus::Delivered(ack)
            }
            Err(e) => {
                let reason = e.to_string();
                self.emit(SyncEvent::NotificationFailed {
                    reason: reason.clone(),
                });
                NotificationStatus::Failed(reason)
            }
        }
    }

    fn enter(&self, state: SyncState) {
        *self.state.write() = state;
        self.emit(SyncEvent::StageEntered(state));
    }

    /// Records an aborted run and hands the error back.
    fn fail(&self, error: SyncError) -> SyncError {
        let stage = {
            let mut state = self.state.write();
            let stage = *state;
            *state = SyncState::Failed;
            stage
        };

        {
            let mut stats = self.stats.write();
            stats.runs_failed += 1;
            stats.last_error = Some(error.to_string());
        }

        self.emit(SyncEvent::Failed {
            stage,
            reason: error.to_string(),
        });
        error
    }

    fn emit(&self, event: SyncEvent) {
        self.observer.on_event(&event);
    }
}

/// Ends a run that unwinds out of a collaborator in `Failed`, so the
/// orchestrator can start again.
struct RunGuard<'a, S, P, N>
where
    S: SourceSystemClient,
    P: ProcessingSystemClient,
    N: NotificationSink,
{
    orchestrator: &'a SyncOrchestrator<S, P, N>,
}

impl<S, P, N> Drop for RunGuard<'_, S, P, N>
where
    S: SourceSystemClient,
    P: ProcessingSystemClient,
    N: NotificationSink,
{
    fn drop(&mut self) {
        let stage = {
            let mut state = self.orchestrator.state.write();
            if !state.is_active() {
                return;
            }
            let stage = *state;
            *state = SyncState::Failed;
            stage
        };

        let reason = format!("run aborted while {stage:?}");
        {
            let mut stats = self.orchestrator.stats.write();
            stats.runs_failed += 1;
            stats.last_error = Some(reason.clone());
        }
        self.orchestrator.emit(SyncEvent::Failed { stage, reason });
    }
}
