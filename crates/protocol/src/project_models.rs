//! Project data models.
//!
//! This module defines the single unit of work in flight, the partial
//! updates the pipeline merges into it, and the run-mode flag.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::stage_models::PipelineStage;

/// The three-part narration script of a lesson.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct ScriptContent {
    /// Opening lines that introduce the topic.
    pub intro: String,

    /// The main explanation.
    pub explanation: String,

    /// Closing summary.
    pub conclusion: String,
}

impl ScriptContent {
    /// A script is complete when none of its parts is blank.
    pub fn is_complete(&self) -> bool {
        [&self.intro, &self.explanation, &self.conclusion]
            .iter()
            .all(|part| !part.trim().is_empty())
    }
}

/// Represents the project currently driven through the pipeline.
///
/// A fresh project is created whenever a topic is set. The generated
/// artifacts (`script`, `generated_code`, `video_url`) are filled in as the
/// run advances and are never cleared until the next reset.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
pub struct ProjectData {
    /// Opaque identifier.
    ///
    /// Empty until a topic is set, regenerated on every new topic and
    /// replaced by the remote task id once the backend accepts the run.
    pub id: String,

    /// The user's free-text topic.
    pub topic: String,

    /// Current pipeline stage.
    pub status: PipelineStage,

    /// Completion percentage, 0 to 100.
    pub progress: u8,

    /// Narration script, once scripting has finished.
    pub script: Option<ScriptContent>,

    /// Generated animation program (Manim scene code).
    pub generated_code: Option<String>,

    /// Reference to the finished video.
    pub video_url: Option<String>,

    /// Refreshed on every status transition.
    pub last_updated: DateTime<Utc>,
}

impl ProjectData {
    /// The initial, empty project.
    pub fn empty() -> Self {
        Self {
            id: String::new(),
            topic: String::new(),
            status: PipelineStage::Idle,
            progress: 0,
            script: None,
            generated_code: None,
            video_url: None,
            last_updated: Utc::now(),
        }
    }

    /// Whether the project is equal to [`ProjectData::empty`], ignoring the timestamp.
    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
            && self.topic.is_empty()
            && self.status == PipelineStage::Idle
            && self.progress == 0
            && self.script.is_none()
            && self.generated_code.is_none()
            && self.video_url.is_none()
    }
}

impl Default for ProjectData {
    fn default() -> Self {
        Self::empty()
    }
}

/// A partial update merged into the current project.
///
/// Fields left as `None` are never written over existing values.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<ScriptContent>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

impl ProjectPatch {
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_script(mut self, script: ScriptContent) -> Self {
        self.script = Some(script);
        self
    }

    pub fn with_generated_code(mut self, code: impl Into<String>) -> Self {
        self.generated_code = Some(code.into());
        self
    }

    pub fn with_video_url(mut self, url: impl Into<String>) -> Self {
        self.video_url = Some(url.into());
        self
    }

    /// Whether the patch carries no field at all.
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.script.is_none()
            && self.generated_code.is_none()
            && self.video_url.is_none()
    }
}

/// Which execution path a run takes.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, TS)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Deterministic scripted run without external services.
    #[default]
    Simulated,

    /// Run delegated to the remote task backend.
    Live,
}

impl RunMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            RunMode::Simulated => RunMode::Live,
            RunMode::Live => RunMode::Simulated,
        }
    }
}
