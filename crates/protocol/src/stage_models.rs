//! Pipeline stage model.
//!
//! This module defines the closed set of stages a project moves through
//! while the pipeline generates its lesson video.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Represents one discrete phase of the generation pipeline.
///
/// The canonical order of a successful run is:
/// Idle -> Scripting -> VoiceSynthesis -> MathVisuals -> AvatarSync -> Completed
///
/// Special states:
/// - Error: terminal failure, reachable from any stage
///
/// Completed and Error are terminal: nothing leaves them except a full
/// project reset.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PipelineStage {
    /// No run is active. The only valid state for a fresh project.
    #[default]
    Idle,

    /// The lesson script and animation code are being written.
    Scripting,

    /// The narration audio is being synthesized.
    VoiceSynthesis,

    /// The math animation scene is being rendered.
    MathVisuals,

    /// The presenter avatar is being lip-synced and composited.
    AvatarSync,

    /// The final video is ready.
    Completed,

    /// The run failed.
    Error,
}

impl PipelineStage {
    /// Every stage of a successful run, in canonical order.
    pub const CANONICAL_ORDER: [PipelineStage; 6] = [
        PipelineStage::Idle,
        PipelineStage::Scripting,
        PipelineStage::VoiceSynthesis,
        PipelineStage::MathVisuals,
        PipelineStage::AvatarSync,
        PipelineStage::Completed,
    ];

    /// Position of the stage in the canonical order.
    ///
    /// `Error` sits outside the order and returns `None`.
    pub fn ordinal(self) -> Option<usize> {
        Self::CANONICAL_ORDER.iter().position(|stage| *stage == self)
    }

    /// Whether the stage ends a run.
    pub fn is_terminal(self) -> bool {
        matches!(self, PipelineStage::Completed | PipelineStage::Error)
    }

    /// Whether a project in this stage has a run in flight.
    pub fn is_active(self) -> bool {
        !matches!(
            self,
            PipelineStage::Idle | PipelineStage::Completed | PipelineStage::Error
        )
    }

    /// Progress shown on entry to this stage when nothing better is known.
    pub fn default_progress(self) -> u8 {
        match self {
            PipelineStage::Idle | PipelineStage::Error => 0,
            PipelineStage::Scripting => 10,
            PipelineStage::VoiceSynthesis => 35,
            PipelineStage::MathVisuals => 60,
            PipelineStage::AvatarSync => 85,
            PipelineStage::Completed => 100,
        }
    }

    /// Short human-readable label used by the stepper.
    pub fn label(self) -> &'static str {
        match self {
            PipelineStage::Idle => "Idle",
            PipelineStage::Scripting => "AI Scripting",
            PipelineStage::VoiceSynthesis => "Voice Gen",
            PipelineStage::MathVisuals => "Math Visuals",
            PipelineStage::AvatarSync => "Avatar Sync",
            PipelineStage::Completed => "Final Export",
            PipelineStage::Error => "Error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinal_follows_canonical_order() {
        assert_eq!(PipelineStage::Idle.ordinal(), Some(0));
        assert_eq!(PipelineStage::AvatarSync.ordinal(), Some(4));
        assert_eq!(PipelineStage::Completed.ordinal(), Some(5));
        assert_eq!(PipelineStage::Error.ordinal(), None);
    }

    #[test]
    fn test_active_and_terminal_are_disjoint() {
        for stage in PipelineStage::CANONICAL_ORDER
            .iter()
            .copied()
            .chain(std::iter::once(PipelineStage::Error))
        {
            assert!(!(stage.is_active() && stage.is_terminal()), "{stage:?}");
        }
        assert!(!PipelineStage::Idle.is_active());
        assert!(PipelineStage::MathVisuals.is_active());
    }

    #[test]
    fn test_default_progress_is_monotonic_along_canonical_order() {
        let progress: Vec<u8> = PipelineStage::CANONICAL_ORDER
            .iter()
            .map(|stage| stage.default_progress())
            .collect();
        assert!(progress.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(progress.last(), Some(&100));
    }
}
