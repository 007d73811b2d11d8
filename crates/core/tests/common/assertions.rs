//! Assertions over the store's event stream and log list.

use aura_protocol::ipc::Event;
use aura_protocol::log_models::{LogEntry, LogKind};
use aura_protocol::stage_models::PipelineStage;

/// Every `(status, progress, is_processing)` the store published, in order.
pub fn project_updates(events: &[Event]) -> Vec<(PipelineStage, u8, bool)> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::ProjectUpdated {
                project,
                is_processing,
            } => Some((project.status, project.progress, *is_processing)),
            _ => None,
        })
        .collect()
}

/// Stages of the published updates with consecutive repeats collapsed.
pub fn stage_sequence(events: &[Event]) -> Vec<PipelineStage> {
    let mut stages: Vec<PipelineStage> = Vec::new();
    for (stage, _, _) in project_updates(events) {
        if stages.last() != Some(&stage) {
            stages.push(stage);
        }
    }
    stages
}

/// Progress never decreases across consecutive updates.
pub fn assert_progress_monotonic(events: &[Event]) {
    let updates = project_updates(events);
    for pair in updates.windows(2) {
        let (before, after) = (pair[0], pair[1]);
        assert!(
            after.1 >= before.1,
            "Progress went backwards: {before:?} -> {after:?}"
        );
    }
}

/// Stages form a subsequence of the canonical order, with ERROR only last.
pub fn assert_stages_follow_canonical_order(events: &[Event]) {
    let stages = stage_sequence(events);
    let mut last_ordinal = None;

    for (index, stage) in stages.iter().enumerate() {
        match stage.ordinal() {
            Some(ordinal) => {
                if let Some(previous) = last_ordinal {
                    assert!(
                        ordinal > previous,
                        "Stage {stage:?} out of order in {stages:?}"
                    );
                }
                last_ordinal = Some(ordinal);
            }
            None => assert_eq!(
                index,
                stages.len() - 1,
                "ERROR must be the final stage in {stages:?}"
            ),
        }
    }
}

/// `is_processing` matches the status in every published update.
pub fn assert_processing_flag_consistent(events: &[Event]) {
    for (stage, progress, is_processing) in project_updates(events) {
        assert_eq!(
            is_processing,
            stage.is_active(),
            "isProcessing={is_processing} while {stage:?} at {progress}%"
        );
    }
}

/// The three run properties that hold for every run.
pub fn assert_run_properties(events: &[Event]) {
    assert_progress_monotonic(events);
    assert_stages_follow_canonical_order(events);
    assert_processing_flag_consistent(events);
}

/// Number of distinct transitions into ERROR.
pub fn error_transitions(events: &[Event]) -> usize {
    stage_sequence(events)
        .iter()
        .filter(|stage| **stage == PipelineStage::Error)
        .count()
}

pub fn count_logs(logs: &[LogEntry], kind: LogKind) -> usize {
    logs.iter().filter(|log| log.kind == kind).count()
}

pub fn has_log_containing(logs: &[LogEntry], kind: LogKind, needle: &str) -> bool {
    logs.iter()
        .any(|log| log.kind == kind && log.message.contains(needle))
}
