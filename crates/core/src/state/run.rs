//! Run tokens.
//!
//! Every pipeline run captures a token when it starts. Starting another run,
//! setting a new topic or resetting the project bumps the store's run
//! generation and cancels the previous token, so the old run can tell that
//! its remaining effects must be discarded.

use thiserror::Error;
use tokio_util::sync::{CancellationToken, WaitForCancellationFuture};

/// Identifies one run and lets it observe being superseded.
#[derive(Debug, Clone)]
pub struct RunToken {
    generation: u64,
    cancel: CancellationToken,
}

impl RunToken {
    pub(crate) fn new(generation: u64, cancel: CancellationToken) -> Self {
        Self { generation, cancel }
    }

    /// Monotonically increasing run number within a store.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a newer run (or a reset) has invalidated this one.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Resolves once this run has been invalidated.
    pub fn cancelled(&self) -> WaitForCancellationFuture<'_> {
        self.cancel.cancelled()
    }
}

/// A write was rejected because its run is no longer current.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("run {generation} was superseded")]
pub struct Superseded {
    pub generation: u64,
}
