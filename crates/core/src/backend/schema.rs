//! Wire schema of the task backend.
//!
//! Payloads are deserialized into the structs below and validated before
//! anything reaches the project store. Optional fields that are blank or
//! malformed are dropped rather than merged.

use crate::backend::base::{BackendError, RemoteStatus, TaskTicket};
use aura_protocol::project_models::ScriptContent;
use serde::{Deserialize, Serialize};

/// Highest status schema version this client understands.
///
/// Payloads without a version are treated as version 1.
pub const SUPPORTED_SCHEMA_VERSION: u32 = 1;

/// Response of `POST /pipeline/start`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitPayload {
    #[serde(rename = "taskId", alias = "task_id")]
    pub task_id: String,

    #[serde(default)]
    pub status: String,
}

impl SubmitPayload {
    pub fn validate(self) -> Result<TaskTicket, BackendError> {
        let task_id = self.task_id.trim();
        if task_id.is_empty() {
            return Err(BackendError::Schema("empty task id".to_string()));
        }

        Ok(TaskTicket {
            task_id: task_id.to_string(),
            status: self.status,
        })
    }
}

/// Asset references inside a status payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetsPayload {
    #[serde(default)]
    pub math_video_url: Option<String>,

    #[serde(default)]
    pub final_video_url: Option<String>,
}

/// Response of `GET /pipeline/status/{task_id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusPayload {
    #[serde(default)]
    pub schema_version: Option<u32>,

    pub status: String,

    #[serde(default)]
    pub progress: Option<f64>,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub manim_code: Option<String>,

    /// Kept loose on the wire; only a complete three-part script is accepted.
    #[serde(default)]
    pub script: Option<serde_json::Value>,

    #[serde(default)]
    pub assets: Option<AssetsPayload>,

    #[serde(default)]
    pub error: Option<String>,
}

impl StatusPayload {
    /// Check the payload and convert it into a [`RemoteStatus`].
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Schema` if the schema version is unsupported
    /// or the status code is blank.
    pub fn validate(self) -> Result<RemoteStatus, BackendError> {
        let version = self.schema_version.unwrap_or(SUPPORTED_SCHEMA_VERSION);
        if version == 0 || version > SUPPORTED_SCHEMA_VERSION {
            return Err(BackendError::Schema(format!(
                "unsupported schema version {version}"
            )));
        }

        let code = self.status.trim();
        if code.is_empty() {
            return Err(BackendError::Schema("empty status code".to_string()));
        }

        let script = self.script.and_then(|value| {
            match serde_json::from_value::<ScriptContent>(value) {
                Ok(script) if script.is_complete() => Some(script),
                Ok(_) => {
                    tracing::warn!("Ignoring incomplete script in status payload");
                    None
                }
                Err(e) => {
                    tracing::warn!("Ignoring malformed script in status payload: {e}");
                    None
                }
            }
        });

        let assets = self.assets.unwrap_or_default();

        Ok(RemoteStatus {
            code: code.to_string(),
            progress: self.progress.and_then(percent),
            message: non_blank(self.message),
            script,
            generated_code: non_blank(self.manim_code),
            math_video_url: non_blank(assets.math_video_url),
            final_video_url: non_blank(assets.final_video_url),
            error: non_blank(self.error),
        })
    }
}

fn percent(value: f64) -> Option<u8> {
    if value.is_finite() {
        Some(value.round().clamp(0.0, 100.0) as u8)
    } else {
        None
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
