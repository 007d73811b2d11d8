//! Simulated run: a fixed five-step script with canned data.
//!
//! Progress values and stage order are fixed so demos and scenario tests
//! see the same sequence every time: 10, 35, 60, 85, 100.

use crate::backend::simulated::SimulatedLesson;
use crate::engine::recorder::RunRecorder;
use crate::engine::RunOutcome;
use crate::state::Superseded;
use aura_protocol::config_models::SimulationSettings;
use aura_protocol::log_models::LogKind;
use aura_protocol::project_models::ProjectPatch;
use aura_protocol::stage_models::PipelineStage;

struct SimulatedStep {
    stage: PipelineStage,
    progress: u8,
    started: &'static str,
    finished: &'static str,
}

const STEPS: [SimulatedStep; 5] = [
    SimulatedStep {
        stage: PipelineStage::Scripting,
        progress: 10,
        started: "Initializing AI agents for topic",
        finished: "Logic agent: script generated successfully.",
    },
    SimulatedStep {
        stage: PipelineStage::VoiceSynthesis,
        progress: 35,
        started: "Sending script to the voice synthesizer...",
        finished: "Audio assets synthesized and cached.",
    },
    SimulatedStep {
        stage: PipelineStage::MathVisuals,
        progress: 60,
        started: "Spinning up the Manim rendering container...",
        finished: "Scene rendering complete (1080p/60fps).",
    },
    SimulatedStep {
        stage: PipelineStage::AvatarSync,
        progress: 85,
        started: "Syncing avatar lip-sync...",
        finished: "Avatar overlay composited.",
    },
    SimulatedStep {
        stage: PipelineStage::Completed,
        progress: 100,
        started: "Exporting final video...",
        finished: "Pipeline completed. Video ready for review.",
    },
];

impl SimulatedStep {
    fn announcement(&self, topic: &str) -> String {
        match self.stage {
            PipelineStage::Scripting => format!("{}: \"{topic}\"...", self.started),
            _ => self.started.to_string(),
        }
    }

    fn output(&self, lesson: &SimulatedLesson) -> ProjectPatch {
        match self.stage {
            PipelineStage::Scripting => ProjectPatch::default()
                .with_script(lesson.script.clone())
                .with_generated_code(lesson.generated_code.clone()),
            PipelineStage::Completed => {
                ProjectPatch::default().with_video_url(lesson.video_url.clone())
            }
            _ => ProjectPatch::default(),
        }
    }
}

pub(crate) async fn run(
    recorder: &RunRecorder<'_>,
    topic: &str,
    settings: &SimulationSettings,
) -> Result<RunOutcome, Superseded> {
    let lesson = SimulatedLesson::for_topic(topic);

    for (index, step) in STEPS.iter().enumerate() {
        recorder.transition(step.stage, step.progress)?;
        recorder.log(step.announcement(topic), LogKind::Info, step.stage)?;

        recorder.sleep(settings.step_delay(index)).await?;

        recorder.log(step.finished, LogKind::Success, step.stage)?;
        let output = step.output(&lesson);
        if !output.is_empty() {
            recorder.merge(output)?;
        }
    }

    Ok(RunOutcome::Completed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_follow_canonical_order() {
        let stages: Vec<PipelineStage> = STEPS.iter().map(|step| step.stage).collect();
        assert_eq!(stages, PipelineStage::CANONICAL_ORDER[1..].to_vec());

        let progress: Vec<u8> = STEPS.iter().map(|step| step.progress).collect();
        assert_eq!(progress, vec![10, 35, 60, 85, 100]);
    }

    #[test]
    fn test_only_first_and_last_steps_produce_data() {
        let lesson = SimulatedLesson::for_topic("Chain Rule");
        let outputs: Vec<ProjectPatch> = STEPS.iter().map(|step| step.output(&lesson)).collect();

        assert!(outputs[0].script.is_some() && outputs[0].generated_code.is_some());
        assert!(outputs[1].is_empty() && outputs[2].is_empty() && outputs[3].is_empty());
        assert!(outputs[4].video_url.is_some());
    }

    #[test]
    fn test_first_announcement_names_topic() {
        assert!(STEPS[0].announcement("Chain Rule").contains("\"Chain Rule\""));
        assert_eq!(STEPS[1].announcement("Chain Rule"), STEPS[1].started);
    }
}
