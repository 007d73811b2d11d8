//! Structured log stream models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::stage_models::PipelineStage;

/// Severity of a log entry as shown to the user.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    Info,
    Success,
    Warning,
    Error,
}

/// An immutable record in the project's log stream.
///
/// The store keeps entries newest-first for display, but each entry keeps
/// its creation timestamp, which is the authority for ordering.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    #[ts(type = "string")]
    pub id: Uuid,

    pub timestamp: DateTime<Utc>,

    pub message: String,

    #[serde(rename = "type")]
    pub kind: LogKind,

    /// The stage the entry was emitted under.
    pub stage: PipelineStage,
}

impl LogEntry {
    /// Create a new entry stamped with a fresh id and the current time.
    pub fn new(message: impl Into<String>, kind: LogKind, stage: PipelineStage) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            message: message.into(),
            kind,
            stage,
        }
    }
}
