//! Inter-process communication protocol.
//!
//! This module defines the message types exchanged between a rendering
//! surface (stepper, log console, video preview) and the Core.
//!
//! The protocol follows an Operation/Event pattern:
//! - `Op`: Commands sent from the surface to Core
//! - `Event`: State changes published by the project store
//!
//! The surface never mutates project state itself; it issues operations
//! and redraws from events.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::log_models::LogEntry;
use crate::project_models::{ProjectData, RunMode};

/// Operations sent from the rendering surface to the Core logic.
///
/// Uses tagged enum serialization for TypeScript compatibility:
/// ```json
/// {
///   "type": "setTopic",
///   "payload": { "topic": "Chain Rule" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Op {
    /// Replace the current project with a fresh one for this topic.
    ///
    /// The surface is responsible for rejecting blank topics.
    SetTopic { topic: String },

    /// Flip between simulated and live execution.
    ToggleRunMode,

    /// Run the pipeline for the current topic.
    ///
    /// Supersedes any run still in flight.
    StartPipeline,

    /// Discard the project and its logs.
    ResetProject,
}

/// Events published by the project store.
///
/// Uses tagged enum serialization for TypeScript compatibility:
/// ```json
/// {
///   "type": "projectUpdated",
///   "payload": { "project": { ... }, "isProcessing": true }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Event {
    /// The project changed (topic, transition or merged data).
    ProjectUpdated {
        project: ProjectData,
        #[serde(rename = "isProcessing")]
        is_processing: bool,
    },

    /// A log entry was appended.
    LogAppended { entry: LogEntry },

    /// The run mode flag changed.
    RunModeChanged { mode: RunMode },

    /// The project and its logs were discarded.
    ProjectReset,
}
