//! Live run: remote task submission, status polling and local fallback.

use crate::backend::base::{BackendError, LessonGenerator, RemoteStatus, TaskBackend};
use crate::engine::recorder::RunRecorder;
use crate::engine::RunOutcome;
use crate::stage::map_remote_status;
use crate::state::Superseded;
use aura_protocol::config_models::PollingSettings;
use aura_protocol::log_models::LogKind;
use aura_protocol::project_models::ProjectPatch;
use aura_protocol::stage_models::PipelineStage;

pub(crate) async fn run(
    recorder: &RunRecorder<'_>,
    topic: &str,
    backend: &dyn TaskBackend,
    generator: &dyn LessonGenerator,
    polling: &PollingSettings,
) -> Result<RunOutcome, Superseded> {
    recorder.log(
        "Connecting to the Aura task backend...",
        LogKind::Info,
        PipelineStage::Idle,
    )?;

    match recorder.race(backend.submit(topic)).await? {
        Ok(ticket) => {
            recorder.merge(ProjectPatch::default().with_id(ticket.task_id.clone()))?;
            recorder.log(
                format!("Task initiated. ID: {}", ticket.task_id),
                LogKind::Success,
                PipelineStage::Scripting,
            )?;
            tracing::info!(task_id = %ticket.task_id, "Remote task accepted");

            poll(recorder, backend, &ticket.task_id, polling).await
        }
        Err(e) => fallback(recorder, topic, generator, e).await,
    }
}

/// Produce script and code locally when the backend refused the task.
///
/// Success completes the run without voice, visuals or video.
async fn fallback(
    recorder: &RunRecorder<'_>,
    topic: &str,
    generator: &dyn LessonGenerator,
    cause: BackendError,
) -> Result<RunOutcome, Superseded> {
    recorder.log(
        format!("Connection failed: {cause}"),
        LogKind::Error,
        PipelineStage::Error,
    )?;
    recorder.log(
        "Attempting direct lesson generation fallback...",
        LogKind::Warning,
        PipelineStage::Scripting,
    )?;

    match recorder.race(generator.generate(topic)).await? {
        Ok(plan) => {
            recorder.merge(
                ProjectPatch::default()
                    .with_script(plan.script)
                    .with_generated_code(plan.generated_code),
            )?;
            recorder.log(
                "Fallback generation successful (script & code only).",
                LogKind::Success,
                PipelineStage::Scripting,
            )?;
            recorder.transition(PipelineStage::Completed, 100)?;
            Ok(RunOutcome::CompletedWithFallback)
        }
        Err(e) => {
            recorder.log(
                format!("Fallback failed: {e}"),
                LogKind::Error,
                PipelineStage::Error,
            )?;
            recorder.transition(PipelineStage::Error, 0)?;
            Ok(RunOutcome::Failed)
        }
    }
}

/// What the poll loop knows about the run so far.
#[derive(Debug, Clone, Copy)]
struct PollTracker {
    stage: PipelineStage,
    progress: u8,
    attempts: u32,
    consecutive_failures: u32,
}

impl PollTracker {
    fn new() -> Self {
        Self {
            stage: PipelineStage::Idle,
            progress: 0,
            attempts: 0,
            consecutive_failures: 0,
        }
    }

    /// Whether `next` is later than the last recorded stage.
    fn advances_to(&self, next: PipelineStage) -> bool {
        matches!(
            (self.stage.ordinal(), next.ordinal()),
            (Some(current), Some(next)) if next > current
        )
    }

    /// Progress to record on entering `next`; never below what was shown.
    fn progress_for(&self, next: PipelineStage, status: &RemoteStatus) -> u8 {
        status
            .progress
            .unwrap_or_else(|| next.default_progress())
            .max(self.progress)
    }
}

async fn poll(
    recorder: &RunRecorder<'_>,
    backend: &dyn TaskBackend,
    task_id: &str,
    polling: &PollingSettings,
) -> Result<RunOutcome, Superseded> {
    let max_attempts = polling.max_attempts.max(1);
    let max_failures = polling.max_consecutive_failures.max(1);
    let mut tracker = PollTracker::new();

    loop {
        if tracker.attempts >= max_attempts {
            recorder.log(
                format!(
                    "Backend did not finish after {} status checks; giving up.",
                    tracker.attempts
                ),
                LogKind::Error,
                PipelineStage::Error,
            )?;
            recorder.transition(PipelineStage::Error, tracker.progress)?;
            return Ok(RunOutcome::Failed);
        }

        recorder.sleep(polling.interval()).await?;
        recorder.ensure_current()?;
        tracker.attempts += 1;

        let status = match recorder.race(backend.status(task_id)).await? {
            Ok(status) => {
                tracker.consecutive_failures = 0;
                status
            }
            Err(e) => {
                tracker.consecutive_failures += 1;
                if tracker.consecutive_failures >= max_failures {
                    recorder.log(
                        format!(
                            "Lost contact with the backend after {} failed status checks: {e}",
                            tracker.consecutive_failures
                        ),
                        LogKind::Error,
                        PipelineStage::Error,
                    )?;
                    recorder.transition(PipelineStage::Error, tracker.progress)?;
                    return Ok(RunOutcome::Failed);
                }

                recorder.log(
                    format!(
                        "Status check failed ({}/{max_failures}): {e}. Retrying...",
                        tracker.consecutive_failures
                    ),
                    LogKind::Warning,
                    tracker.stage,
                )?;
                continue;
            }
        };

        let mapped = map_remote_status(&status.code);
        tracing::debug!(
            generation = recorder.generation(),
            code = %status.code,
            ?mapped,
            progress = ?status.progress,
            "Polled task status"
        );

        merge_artifacts(recorder, &status)?;

        match mapped {
            PipelineStage::Completed => {
                if let Some(url) = status.video_url() {
                    recorder.merge(ProjectPatch::default().with_video_url(url))?;
                }
                recorder.transition(PipelineStage::Completed, 100)?;
                recorder.log(
                    "Pipeline completed. Video ready for review.",
                    LogKind::Success,
                    PipelineStage::Completed,
                )?;
                return Ok(RunOutcome::Completed);
            }
            PipelineStage::Error => {
                let reason = status
                    .error
                    .or(status.message)
                    .unwrap_or_else(|| "no error details provided".to_string());
                recorder.log(
                    format!("Backend reported failure: {reason}"),
                    LogKind::Error,
                    PipelineStage::Error,
                )?;
                recorder.transition(PipelineStage::Error, tracker.progress)?;
                return Ok(RunOutcome::Failed);
            }
            next if tracker.advances_to(next) => {
                let progress = tracker.progress_for(next, &status);
                recorder.transition(next, progress)?;
                recorder.log(
                    format!("Stage changed: {} ({progress}%)", next.label()),
                    LogKind::Info,
                    next,
                )?;
                tracker.stage = next;
                tracker.progress = progress;
            }
            other => {
                tracing::debug!(
                    current = ?tracker.stage,
                    reported = ?other,
                    "Ignoring status that does not advance the run"
                );
            }
        }
    }
}

/// Merge script and code the backend has made available.
///
/// The store keeps the first value of each, so repeated payloads are no-ops.
fn merge_artifacts(recorder: &RunRecorder<'_>, status: &RemoteStatus) -> Result<(), Superseded> {
    let mut patch = ProjectPatch::default();
    if let Some(script) = &status.script {
        patch = patch.with_script(script.clone());
    }
    if let Some(code) = &status.generated_code {
        patch = patch.with_generated_code(code.clone());
    }

    if !patch.is_empty() && recorder.merge(patch)? {
        tracing::debug!("Merged lesson artifacts from backend");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_only_advances_forward() {
        let mut tracker = PollTracker::new();
        assert!(tracker.advances_to(PipelineStage::Scripting));
        assert!(!tracker.advances_to(PipelineStage::Idle));

        tracker.stage = PipelineStage::MathVisuals;
        assert!(!tracker.advances_to(PipelineStage::VoiceSynthesis));
        assert!(!tracker.advances_to(PipelineStage::MathVisuals));
        assert!(tracker.advances_to(PipelineStage::AvatarSync));
        assert!(!tracker.advances_to(PipelineStage::Error));
    }

    #[test]
    fn test_tracker_progress_never_decreases() {
        let mut tracker = PollTracker::new();
        tracker.progress = 50;

        let lagging = RemoteStatus::new("COMPOSITING").with_progress(20);
        assert_eq!(tracker.progress_for(PipelineStage::AvatarSync, &lagging), 50);

        let silent = RemoteStatus::new("COMPOSITING");
        assert_eq!(tracker.progress_for(PipelineStage::AvatarSync, &silent), 85);
    }
}
