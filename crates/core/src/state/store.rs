//! Project store: the single source of truth for the active project.
//!
//! The ProjectStore holds the project in flight, its log stream, the
//! run-mode flag and the current run token. It owns no logic about *when*
//! to transition; the orchestrator decides that and calls in here.
//!
//! Every operation is synchronous and runs inside one critical section, so
//! readers never observe a half-applied mutation. Each mutation is then
//! published as an [`Event`] to every subscriber.

use crate::state::project::{apply_patch, apply_transition, create_project, is_processing, push_log};
use crate::state::run::{RunToken, Superseded};
use aura_protocol::config_models::AuraSettings;
use aura_protocol::ipc::Event;
use aura_protocol::log_models::{LogEntry, LogKind};
use aura_protocol::project_models::{ProjectData, ProjectPatch, RunMode};
use aura_protocol::stage_models::PipelineStage;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

const EVENT_CHANNEL_CAPACITY: usize = 256;
const DEFAULT_MAX_LOG_ENTRIES: usize = 500;

struct StoreState {
    project: ProjectData,
    /// Newest first.
    logs: VecDeque<LogEntry>,
    run_mode: RunMode,
    is_processing: bool,
    run_generation: u64,
    run_cancel: CancellationToken,
}

impl StoreState {
    fn check(&self, run: &RunToken) -> Result<(), Superseded> {
        if self.run_generation == run.generation() {
            Ok(())
        } else {
            Err(Superseded {
                generation: run.generation(),
            })
        }
    }

    /// Cancel the current run and start a new generation.
    fn invalidate_run(&mut self) -> RunToken {
        self.run_cancel.cancel();
        self.run_generation += 1;
        self.run_cancel = CancellationToken::new();
        RunToken::new(self.run_generation, self.run_cancel.clone())
    }
}

/// A consistent, point-in-time copy of everything the store holds.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreSnapshot {
    pub project: ProjectData,
    /// Newest first.
    pub logs: Vec<LogEntry>,
    pub run_mode: RunMode,
    pub is_processing: bool,
}

/// Holds the active project, its logs and the run-mode flag.
///
/// The store is an explicit context object: create one per client session
/// and share it through an `Arc`.
pub struct ProjectStore {
    inner: Mutex<StoreState>,
    events_tx: broadcast::Sender<Event>,
    max_log_entries: usize,
}

impl ProjectStore {
    /// Create a store holding the empty project.
    ///
    /// # Arguments
    ///
    /// * `run_mode` - Initial value of the run-mode flag
    /// * `max_log_entries` - Log retention; older entries are evicted
    pub fn new(run_mode: RunMode, max_log_entries: usize) -> Self {
        let (events_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Self {
            inner: Mutex::new(StoreState {
                project: ProjectData::empty(),
                logs: VecDeque::new(),
                run_mode,
                is_processing: false,
                run_generation: 0,
                run_cancel: CancellationToken::new(),
            }),
            events_tx,
            max_log_entries: max_log_entries.max(1),
        }
    }

    /// Create a store configured from settings.
    pub fn from_settings(settings: &AuraSettings) -> Self {
        Self::new(settings.run.mode, settings.logs.max_entries)
    }

    /// Subscribe to every future mutation of the store.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.events_tx.subscribe()
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, event: Event) {
        // No subscribers is not an error.
        let _ = self.events_tx.send(event);
    }

    fn publish_project(&self, state: &StoreState) {
        self.publish(Event::ProjectUpdated {
            project: state.project.clone(),
            is_processing: state.is_processing,
        });
    }

    // ----- Surface operations -------------------------------------------------

    /// Replace the project with a fresh one for `topic`.
    ///
    /// The store does not validate the topic: callers must reject blank
    /// topics before calling. Any run still in flight is invalidated.
    pub fn set_topic(&self, topic: impl Into<String>) {
        let mut state = self.lock();
        state.invalidate_run();
        state.project = create_project(topic.into());
        state.is_processing = false;
        self.publish_project(&state);
    }

    /// Flip the run-mode flag.
    ///
    /// A run already in flight keeps the mode it started with.
    ///
    /// # Returns
    ///
    /// The new mode.
    pub fn toggle_run_mode(&self) -> RunMode {
        let mut state = self.lock();
        state.run_mode = state.run_mode.toggled();
        let mode = state.run_mode;
        self.publish(Event::RunModeChanged { mode });
        mode
    }

    /// Restore the empty project and clear all logs.
    ///
    /// Any run still in flight is invalidated. The run mode is kept.
    pub fn reset(&self) {
        let mut state = self.lock();
        state.invalidate_run();
        state.project = ProjectData::empty();
        state.logs.clear();
        state.is_processing = false;
        self.publish(Event::ProjectReset);
        self.publish_project(&state);
    }

    // ----- Recorder operations ------------------------------------------------

    /// Append a log entry under `stage`.
    pub fn append_log(&self, message: impl Into<String>, kind: LogKind, stage: PipelineStage) {
        let mut state = self.lock();
        self.append_log_locked(&mut state, LogEntry::new(message, kind, stage));
    }

    /// Record a status transition.
    pub fn record_transition(&self, status: PipelineStage, progress: u8) {
        let mut state = self.lock();
        self.record_transition_locked(&mut state, status, progress);
    }

    /// Merge a partial update into the project.
    ///
    /// # Returns
    ///
    /// `true` if any field changed.
    pub fn merge_data(&self, patch: ProjectPatch) -> bool {
        let mut state = self.lock();
        self.merge_data_locked(&mut state, patch)
    }

    fn append_log_locked(&self, state: &mut StoreState, entry: LogEntry) {
        mirror_to_tracing(&entry);
        push_log(&mut state.logs, entry.clone(), self.max_log_entries);
        self.publish(Event::LogAppended { entry });
    }

    fn record_transition_locked(&self, state: &mut StoreState, status: PipelineStage, progress: u8) {
        apply_transition(&mut state.project, status, progress);
        state.is_processing = is_processing(status);
        self.publish_project(state);
    }

    fn merge_data_locked(&self, state: &mut StoreState, patch: ProjectPatch) -> bool {
        let changed = apply_patch(&mut state.project, patch);
        if changed {
            self.publish_project(state);
        }
        changed
    }

    // ----- Run-scoped operations ----------------------------------------------

    /// Start a new run on a fresh project for the current topic.
    ///
    /// The previous run (if any) is cancelled and every write it attempts
    /// from now on is rejected. The topic is kept; the id, status, progress
    /// and generated artifacts start over so nothing from an earlier run
    /// survives into this one.
    pub fn begin_run(&self) -> RunToken {
        let mut state = self.lock();
        self.begin_run_locked(&mut state)
    }

    /// [`ProjectStore::begin_run`] if the current topic is not blank.
    ///
    /// The topic check, the run-mode read and the new generation happen under
    /// one lock, so a concurrent reset, topic change or mode toggle either
    /// lands before the claim or supersedes the claimed run.
    pub fn try_begin_run(&self) -> Option<(RunToken, String, RunMode)> {
        let mut state = self.lock();
        if state.project.topic.trim().is_empty() {
            return None;
        }

        let mode = state.run_mode;
        let token = self.begin_run_locked(&mut state);
        Some((token, state.project.topic.clone(), mode))
    }

    fn begin_run_locked(&self, state: &mut StoreState) -> RunToken {
        let token = state.invalidate_run();
        let topic = std::mem::take(&mut state.project.topic);
        state.project = create_project(topic);
        state.is_processing = false;
        self.publish_project(state);
        token
    }

    /// Whether `run` is still the current run.
    pub fn is_current(&self, run: &RunToken) -> bool {
        self.lock().check(run).is_ok()
    }

    /// [`ProjectStore::append_log`], discarded unless `run` is current.
    pub fn append_log_for(
        &self,
        run: &RunToken,
        message: impl Into<String>,
        kind: LogKind,
        stage: PipelineStage,
    ) -> Result<(), Superseded> {
        let mut state = self.lock();
        state.check(run)?;
        self.append_log_locked(&mut state, LogEntry::new(message, kind, stage));
        Ok(())
    }

    /// [`ProjectStore::record_transition`], discarded unless `run` is current.
    pub fn record_transition_for(
        &self,
        run: &RunToken,
        status: PipelineStage,
        progress: u8,
    ) -> Result<(), Superseded> {
        let mut state = self.lock();
        state.check(run)?;
        self.record_transition_locked(&mut state, status, progress);
        Ok(())
    }

    /// [`ProjectStore::merge_data`], discarded unless `run` is current.
    pub fn merge_data_for(&self, run: &RunToken, patch: ProjectPatch) -> Result<bool, Superseded> {
        let mut state = self.lock();
        state.check(run)?;
        Ok(self.merge_data_locked(&mut state, patch))
    }

    // ----- Readers ------------------------------------------------------------

    pub fn project(&self) -> ProjectData {
        self.lock().project.clone()
    }

    /// All retained log entries, newest first.
    pub fn logs(&self) -> Vec<LogEntry> {
        self.lock().logs.iter().cloned().collect()
    }

    pub fn is_processing(&self) -> bool {
        self.lock().is_processing
    }

    pub fn run_mode(&self) -> RunMode {
        self.lock().run_mode
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        let state = self.lock();
        StoreSnapshot {
            project: state.project.clone(),
            logs: state.logs.iter().cloned().collect(),
            run_mode: state.run_mode,
            is_processing: state.is_processing,
        }
    }
}

impl Default for ProjectStore {
    fn default() -> Self {
        Self::new(RunMode::default(), DEFAULT_MAX_LOG_ENTRIES)
    }
}

fn mirror_to_tracing(entry: &LogEntry) {
    let stage = entry.stage.label();
    match entry.kind {
        LogKind::Info | LogKind::Success => {
            tracing::info!(stage, kind = ?entry.kind, "{}", entry.message)
        }
        LogKind::Warning => tracing::warn!(stage, "{}", entry.message),
        LogKind::Error => tracing::error!(stage, "{}", entry.message),
    }
}
