//! Scripted collaborator implementations for testing and demos.

use crate::backend::base::{
    BackendError, GenerationError, LessonGenerator, LessonPlan, RemoteStatus, TaskBackend,
    TaskTicket,
};
use crate::backend::simulated::SimulatedLesson;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

/// A task backend that replays a fixed script of responses.
///
/// Status responses are handed out in order; the last one is repeated once
/// the script runs out.
pub struct ScriptedBackend {
    submission: Result<TaskTicket, BackendError>,
    statuses: Mutex<VecDeque<Result<RemoteStatus, BackendError>>>,
    submit_calls: AtomicUsize,
    status_calls: AtomicUsize,
}

impl ScriptedBackend {
    pub fn new(
        submission: Result<TaskTicket, BackendError>,
        statuses: Vec<Result<RemoteStatus, BackendError>>,
    ) -> Self {
        Self {
            submission,
            statuses: Mutex::new(statuses.into()),
            submit_calls: AtomicUsize::new(0),
            status_calls: AtomicUsize::new(0),
        }
    }

    /// Accepts the task and walks it through every stage to completion.
    pub fn happy_path(task_id: &str) -> Self {
        let lesson = SimulatedLesson::for_topic(task_id);
        Self::new(
            Ok(TaskTicket {
                task_id: task_id.to_string(),
                status: "PENDING".to_string(),
            }),
            vec![
                Ok(RemoteStatus::new("PENDING")),
                Ok(RemoteStatus::new("GENERATING_SCRIPT").with_progress(15)),
                Ok(RemoteStatus::new("SYNTHESIZING_AUDIO")
                    .with_progress(40)
                    .with_script(lesson.script)
                    .with_generated_code(lesson.generated_code)),
                Ok(RemoteStatus::new("RENDERING_MATH").with_progress(65)),
                Ok(RemoteStatus::new("COMPOSITING").with_progress(90)),
                Ok(RemoteStatus::new("COMPLETED")
                    .with_progress(100)
                    .with_final_video_url(lesson.video_url)),
            ],
        )
    }

    /// Cannot be reached at all.
    pub fn unreachable() -> Self {
        Self::new(
            Err(BackendError::Transport("connection refused".to_string())),
            vec![Err(BackendError::Transport("connection refused".to_string()))],
        )
    }

    pub fn submit_calls(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TaskBackend for ScriptedBackend {
    async fn submit(&self, _topic: &str) -> Result<TaskTicket, BackendError> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        self.submission.clone()
    }

    async fn status(&self, _task_id: &str) -> Result<RemoteStatus, BackendError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        let mut statuses = self.statuses.lock().unwrap_or_else(PoisonError::into_inner);

        if statuses.len() > 1 {
            if let Some(next) = statuses.pop_front() {
                return next;
            }
        }

        statuses
            .front()
            .cloned()
            .unwrap_or_else(|| Err(BackendError::Transport("no scripted status".to_string())))
    }
}

/// A lesson generator with a fixed answer.
#[derive(Clone)]
pub struct StaticGenerator {
    result: Result<LessonPlan, GenerationError>,
}

impl StaticGenerator {
    pub fn new(result: Result<LessonPlan, GenerationError>) -> Self {
        Self { result }
    }

    /// Always answers with the simulated lesson for the requested topic.
    pub fn success() -> Self {
        let lesson = SimulatedLesson::for_topic("");
        Self::new(Ok(LessonPlan {
            title: lesson.title,
            script: lesson.script,
            generated_code: lesson.generated_code,
        }))
    }

    pub fn failing() -> Self {
        Self::new(Err(GenerationError::ApiError("Mock failure".to_string())))
    }
}

#[async_trait]
impl LessonGenerator for StaticGenerator {
    async fn generate(&self, topic: &str) -> Result<LessonPlan, GenerationError> {
        self.result.clone().map(|mut plan| {
            if plan.title.is_empty() {
                plan.title = topic.to_string();
            }
            plan
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_backend_replays_then_repeats_last() {
        let backend = ScriptedBackend::new(
            Ok(TaskTicket {
                task_id: "t".to_string(),
                status: "PENDING".to_string(),
            }),
            vec![
                Ok(RemoteStatus::new("PENDING")),
                Ok(RemoteStatus::new("COMPLETED")),
            ],
        );

        assert_eq!(backend.submit("topic").await.expect("accepted").task_id, "t");
        assert_eq!(backend.status("t").await.expect("status").code, "PENDING");
        assert_eq!(backend.status("t").await.expect("status").code, "COMPLETED");
        assert_eq!(backend.status("t").await.expect("status").code, "COMPLETED");
        assert_eq!(backend.submit_calls(), 1);
        assert_eq!(backend.status_calls(), 3);
    }

    #[tokio::test]
    async fn test_unreachable_backend() {
        let backend = ScriptedBackend::unreachable();
        assert!(matches!(
            backend.submit("topic").await,
            Err(BackendError::Transport(_))
        ));
    }

    #[tokio::test]
    async fn test_static_generator() {
        let plan = StaticGenerator::success()
            .generate("Chain Rule")
            .await
            .expect("plan");
        assert_eq!(plan.title, "Chain Rule");

        assert!(StaticGenerator::failing().generate("Chain Rule").await.is_err());
    }
}
