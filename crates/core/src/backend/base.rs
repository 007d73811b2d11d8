//! Collaborator traits and supporting types.
//!
//! The orchestrator talks to two external collaborators:
//! - a [`TaskBackend`] that runs the full pipeline remotely and reports
//!   its progress when polled
//! - a [`LessonGenerator`] that writes the script and animation code
//!   directly, used when the backend cannot be reached

use async_trait::async_trait;
use aura_protocol::project_models::ScriptContent;
use thiserror::Error;

/// Acknowledgement of a submitted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskTicket {
    pub task_id: String,
    /// Status code reported at submission time.
    pub status: String,
}

/// A validated status report for a remote task.
///
/// Produced from the wire payload by
/// [`StatusPayload::validate`](crate::backend::schema::StatusPayload::validate);
/// every optional field is either absent or usable as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteStatus {
    /// Raw backend status code, e.g. `RENDERING_MATH`.
    pub code: String,
    /// Completion percentage, 0 to 100.
    pub progress: Option<u8>,
    pub message: Option<String>,
    pub script: Option<ScriptContent>,
    pub generated_code: Option<String>,
    pub math_video_url: Option<String>,
    pub final_video_url: Option<String>,
    pub error: Option<String>,
}

impl RemoteStatus {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Self::default()
        }
    }

    pub fn with_progress(mut self, progress: u8) -> Self {
        self.progress = Some(progress);
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

    pub fn with_final_video_url(mut self, url: impl Into<String>) -> Self {
        self.final_video_url = Some(url.into());
        self
    }

    pub fn with_math_video_url(mut self, url: impl Into<String>) -> Self {
        self.math_video_url = Some(url.into());
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// The best available reference to the finished video.
    pub fn video_url(&self) -> Option<&str> {
        self.final_video_url
            .as_deref()
            .or(self.math_video_url.as_deref())
    }
}

/// Script and animation code produced by direct generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonPlan {
    pub title: String,
    pub script: ScriptContent,
    pub generated_code: String,
}

/// Failures talking to the task backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The backend could not be reached or the request timed out.
    #[error("Backend unreachable: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("Backend returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The backend answered with a payload that does not match the schema.
    #[error("Invalid backend payload: {0}")]
    Schema(String),
}

/// Failures of direct lesson generation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("Missing API key for lesson generation: set {0}")]
    MissingCredentials(String),
    #[error("Generation API call failed: {0}")]
    ApiError(String),
    #[error("Invalid generation response: {0}")]
    InvalidResponse(String),
}

/// Remote system that runs the whole pipeline as a task.
#[async_trait]
pub trait TaskBackend: Send + Sync {
    /// Submit a new task for `topic`.
    async fn submit(&self, topic: &str) -> Result<TaskTicket, BackendError>;

    /// Fetch the current status of a submitted task.
    async fn status(&self, task_id: &str) -> Result<RemoteStatus, BackendError>;
}

/// Direct script and code generation for a topic.
#[async_trait]
pub trait LessonGenerator: Send + Sync {
    async fn generate(&self, topic: &str) -> Result<LessonPlan, GenerationError>;
}
