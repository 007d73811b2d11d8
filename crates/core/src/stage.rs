//! Mapping from backend task status codes to pipeline stages.

use aura_protocol::stage_models::PipelineStage;

/// Translate a status code reported by the task backend into a stage.
///
/// Unknown codes map to [`PipelineStage::Idle`] instead of failing, so a
/// backend that grows new statuses cannot break the poll loop.
///
/// # Examples
///
/// ```
/// use aura_core::stage::map_remote_status;
/// use aura_protocol::PipelineStage;
///
/// assert_eq!(map_remote_status("RENDERING_MATH"), PipelineStage::MathVisuals);
/// assert_eq!(map_remote_status("WARMING_UP"), PipelineStage::Idle);
/// ```
pub fn map_remote_status(code: &str) -> PipelineStage {
    match code {
        "PENDING" => PipelineStage::Idle,
        "GENERATING_SCRIPT" => PipelineStage::Scripting,
        "SYNTHESIZING_AUDIO" => PipelineStage::VoiceSynthesis,
        "RENDERING_MATH" => PipelineStage::MathVisuals,
        "COMPOSITING" => PipelineStage::AvatarSync,
        "COMPLETED" => PipelineStage::Completed,
        "FAILED" => PipelineStage::Error,
        _ => PipelineStage::Idle,
    }
}
