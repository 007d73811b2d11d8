//! Run-scoped access to the project store.
//!
//! A `RunRecorder` is the only way a run writes to the store. Every write
//! goes through the store's run-checked operations, and every wait or
//! remote call races the run's cancellation, so a superseded run stops at
//! its next suspension point and none of its late results land.

use crate::state::{ProjectStore, RunToken, Superseded};
use aura_protocol::log_models::LogKind;
use aura_protocol::project_models::ProjectPatch;
use aura_protocol::stage_models::PipelineStage;
use std::future::Future;
use std::time::Duration;

pub(crate) struct RunRecorder<'a> {
    store: &'a ProjectStore,
    token: RunToken,
}

impl<'a> RunRecorder<'a> {
    pub(crate) fn new(store: &'a ProjectStore, token: RunToken) -> Self {
        Self { store, token }
    }

    pub(crate) fn generation(&self) -> u64 {
        self.token.generation()
    }

    fn superseded(&self) -> Superseded {
        Superseded {
            generation: self.token.generation(),
        }
    }

    pub(crate) fn log(
        &self,
        message: impl Into<String>,
        kind: LogKind,
        stage: PipelineStage,
    ) -> Result<(), Superseded> {
        self.store.append_log_for(&self.token, message, kind, stage)
    }

    pub(crate) fn transition(&self, stage: PipelineStage, progress: u8) -> Result<(), Superseded> {
        self.store.record_transition_for(&self.token, stage, progress)
    }

    pub(crate) fn merge(&self, patch: ProjectPatch) -> Result<bool, Superseded> {
        self.store.merge_data_for(&self.token, patch)
    }

    /// Fail fast if a newer run has started.
    pub(crate) fn ensure_current(&self) -> Result<(), Superseded> {
        if self.store.is_current(&self.token) {
            Ok(())
        } else {
            Err(self.superseded())
        }
    }

    /// Wait for `duration`, or until the run is superseded.
    pub(crate) async fn sleep(&self, duration: Duration) -> Result<(), Superseded> {
        self.race(tokio::time::sleep(duration)).await
    }

    /// Drive `future` to completion unless the run is superseded first.
    ///
    /// A superseded run drops the future; its result is never observed.
    pub(crate) async fn race<F: Future>(&self, future: F) -> Result<F::Output, Superseded> {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(self.superseded()),
            output = future => Ok(output),
        }
    }
}
