//! Mock backends with explicit control over when responses arrive.

use async_trait::async_trait;
use aura_core::backend::base::{BackendError, RemoteStatus, TaskBackend, TaskTicket};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;

use super::fixtures::tagged_script;

/// Hands out `task-1`, `task-2`, ... and holds the status request of
/// `task-1` until released.
///
/// Every task completes immediately once its status is answered; each
/// response carries artifacts tagged with its task id.
pub struct GatedBackend {
    submitted: AtomicUsize,
    entered: Notify,
    release: Notify,
}

impl GatedBackend {
    pub const GATED_TASK: &'static str = "task-1";

    pub fn new() -> Self {
        Self {
            submitted: AtomicUsize::new(0),
            entered: Notify::new(),
            release: Notify::new(),
        }
    }

    /// Wait until the gated status request is in flight.
    pub async fn wait_until_gated(&self) {
        self.entered.notified().await;
    }

    /// Let the gated status request answer.
    pub fn release(&self) {
        self.release.notify_one();
    }

    pub fn submitted(&self) -> usize {
        self.submitted.load(Ordering::SeqCst)
    }

    pub fn completed_status(task_id: &str) -> RemoteStatus {
        RemoteStatus::new("COMPLETED")
            .with_progress(100)
            .with_script(tagged_script(task_id))
            .with_generated_code(format!("# scene for {task_id}"))
            .with_final_video_url(format!("https://videos.example/{task_id}.mp4"))
    }
}

#[async_trait]
impl TaskBackend for GatedBackend {
    async fn submit(&self, _topic: &str) -> Result<TaskTicket, BackendError> {
        let n = self.submitted.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(TaskTicket {
            task_id: format!("task-{n}"),
            status: "PENDING".to_string(),
        })
    }

    async fn status(&self, task_id: &str) -> Result<RemoteStatus, BackendError> {
        if task_id == Self::GATED_TASK {
            self.entered.notify_one();
            self.release.notified().await;
        }
        Ok(Self::completed_status(task_id))
    }
}
