//! Project state machine implementation.
//!
//! This module provides the functions that mutate a `ProjectData` and the
//! log buffer. They hold no locks and emit no events; the store wraps each
//! call in its critical section and publishes the result.

use aura_protocol::log_models::LogEntry;
use aura_protocol::project_models::{ProjectData, ProjectPatch};
use aura_protocol::stage_models::PipelineStage;
use chrono::Utc;
use std::collections::VecDeque;
use uuid::Uuid;

/// Create a fresh project for a topic.
///
/// The project gets a new id, starts Idle at 0% and carries no generated
/// artifacts.
pub fn create_project(topic: String) -> ProjectData {
    ProjectData {
        id: Uuid::new_v4().to_string(),
        topic,
        ..ProjectData::empty()
    }
}

/// Whether a project in `status` has a run in flight.
///
/// This is the single authoritative definition of `is_processing`.
pub fn is_processing(status: PipelineStage) -> bool {
    status.is_active()
}

/// Move the project to `status` at `progress` and refresh its timestamp.
///
/// Progress above 100 is clamped.
pub fn apply_transition(project: &mut ProjectData, status: PipelineStage, progress: u8) {
    project.status = status;
    project.progress = progress.min(100);
    project.last_updated = Utc::now();
}

/// Merge a partial update into the project.
///
/// Absent fields never overwrite present ones. The generated artifacts are
/// write-once: a value that is already set is kept. The id is always
/// replaced when supplied.
///
/// # Returns
///
/// `true` if any field changed.
pub fn apply_patch(project: &mut ProjectData, patch: ProjectPatch) -> bool {
    let mut changed = false;

    if let Some(id) = patch.id {
        if project.id != id {
            project.id = id;
            changed = true;
        }
    }

    changed |= set_once(&mut project.script, patch.script);
    changed |= set_once(&mut project.generated_code, patch.generated_code);
    changed |= set_once(&mut project.video_url, patch.video_url);

    changed
}

fn set_once<T>(slot: &mut Option<T>, value: Option<T>) -> bool {
    match (slot.is_none(), value) {
        (true, Some(value)) => {
            *slot = Some(value);
            true
        }
        _ => false,
    }
}

/// Prepend a log entry, evicting the oldest entries beyond `capacity`.
pub fn push_log(logs: &mut VecDeque<LogEntry>, entry: LogEntry, capacity: usize) {
    logs.push_front(entry);
    logs.truncate(capacity.max(1));
}
