//! Pipeline execution engine.
//!
//! The PipelineOrchestrator drives one run of the pipeline from IDLE to a
//! terminal stage, recording every transition, log line and generated
//! artifact in the [`ProjectStore`]. It never touches project state
//! directly.
//!
//! A run takes one of two paths, chosen by the store's run-mode flag when
//! the run starts:
//! - simulated: a fixed five-step script with canned data
//! - live: remote task submission and status polling, with a direct
//!   generation fallback when the backend cannot be reached
//!
//! Only one run is current at a time. Starting a run supersedes the
//! previous one; the old run stops at its next suspension point and its
//! late results are discarded.

mod live;
mod recorder;
mod simulated;

use crate::backend::base::{LessonGenerator, TaskBackend};
use crate::state::{ProjectStore, RunToken};
use aura_protocol::config_models::{AuraSettings, PollingSettings, SimulationSettings};
use aura_protocol::ipc::Op;
use aura_protocol::project_models::RunMode;
use recorder::RunRecorder;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::Instrument;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every stage finished; the project holds a video.
    Completed,

    /// The backend was unreachable and direct generation produced script
    /// and code only.
    CompletedWithFallback,

    /// The run ended in the ERROR stage.
    Failed,

    /// A newer run (or a reset) took over; nothing more was recorded.
    Superseded,
}

/// Timing and bounds of pipeline runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineSettings {
    pub polling: PollingSettings,
    pub simulation: SimulationSettings,
}

impl EngineSettings {
    pub fn from_settings(settings: &AuraSettings) -> Self {
        Self {
            polling: settings.polling.clone(),
            simulation: settings.simulation.clone(),
        }
    }
}

/// Everything a run captures when it starts.
struct PreparedRun {
    token: RunToken,
    topic: String,
    mode: RunMode,
}

/// Drives pipeline runs against a project store.
pub struct PipelineOrchestrator {
    store: Arc<ProjectStore>,
    backend: Arc<dyn TaskBackend>,
    generator: Arc<dyn LessonGenerator>,
    settings: EngineSettings,
}

impl PipelineOrchestrator {
    /// Create a new PipelineOrchestrator.
    ///
    /// # Arguments
    ///
    /// * `store` - The store recording all project state
    /// * `backend` - Remote task system used by live runs
    /// * `generator` - Direct generation used when the backend is unreachable
    /// * `settings` - Poll bounds and simulated step latencies
    pub fn new(
        store: Arc<ProjectStore>,
        backend: Arc<dyn TaskBackend>,
        generator: Arc<dyn LessonGenerator>,
        settings: EngineSettings,
    ) -> Self {
        Self {
            store,
            backend,
            generator,
            settings,
        }
    }

    pub fn store(&self) -> &Arc<ProjectStore> {
        &self.store
    }

    /// Check preconditions and claim a new run.
    ///
    /// Returns `None` without touching the store when the topic is blank.
    fn prepare_run(&self) -> Option<PreparedRun> {
        let Some((token, topic, mode)) = self.store.try_begin_run() else {
            tracing::debug!("Ignoring pipeline start without a topic");
            return None;
        };

        Some(PreparedRun { token, topic, mode })
    }

    /// Run the pipeline for the current topic on the calling task.
    ///
    /// # Returns
    ///
    /// `None` if the project has no topic (nothing is started), otherwise
    /// how the run ended.
    pub async fn run_pipeline(&self) -> Option<RunOutcome> {
        let run = self.prepare_run()?;
        Some(self.execute(run).await)
    }

    /// Start the pipeline for the current topic in the background.
    ///
    /// The run is claimed before this returns, so two consecutive calls
    /// always leave the second run current.
    ///
    /// # Returns
    ///
    /// `None` if the project has no topic, otherwise the handle of the
    /// spawned run.
    pub fn start_pipeline(self: &Arc<Self>) -> Option<JoinHandle<RunOutcome>> {
        let run = self.prepare_run()?;
        let orchestrator = Arc::clone(self);
        Some(tokio::spawn(async move { orchestrator.execute(run).await }))
    }

    /// Apply an operation issued by the rendering surface.
    ///
    /// Blank topics are rejected here, silently: no project change and no
    /// log line.
    ///
    /// # Returns
    ///
    /// The handle of the spawned run for `Op::StartPipeline`, `None`
    /// otherwise.
    pub fn handle_op(self: &Arc<Self>, op: Op) -> Option<JoinHandle<RunOutcome>> {
        match op {
            Op::SetTopic { topic } => {
                let topic = topic.trim();
                if !topic.is_empty() {
                    self.store.set_topic(topic);
                }
                None
            }
            Op::ToggleRunMode => {
                self.store.toggle_run_mode();
                None
            }
            Op::StartPipeline => self.start_pipeline(),
            Op::ResetProject => {
                self.store.reset();
                None
            }
        }
    }

    async fn execute(&self, run: PreparedRun) -> RunOutcome {
        let PreparedRun { token, topic, mode } = run;
        let span = tracing::info_span!("pipeline_run", generation = token.generation(), ?mode);

        async move {
            tracing::info!(%topic, "Pipeline run started");
            let recorder = RunRecorder::new(&self.store, token);

            let result = match mode {
                RunMode::Simulated => {
                    simulated::run(&recorder, &topic, &self.settings.simulation).await
                }
                RunMode::Live => {
                    live::run(
                        &recorder,
                        &topic,
                        self.backend.as_ref(),
                        self.generator.as_ref(),
                        &self.settings.polling,
                    )
                    .await
                }
            };

            match result {
                Ok(outcome) => {
                    tracing::info!(?outcome, "Pipeline run finished");
                    outcome
                }
                Err(superseded) => {
                    tracing::info!("Pipeline run discarded: {superseded}");
                    RunOutcome::Superseded
                }
            }
        }
        .instrument(span)
        .await
    }
}
