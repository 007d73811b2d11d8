//! The `aura run` command.

use crate::render::{summary, Console};
use crate::RunArgs;
use aura_core::backend::{GeminiLessonGenerator, HttpTaskBackend};
use aura_core::config::load_config;
use aura_core::engine::{EngineSettings, PipelineOrchestrator, RunOutcome};
use aura_core::state::ProjectStore;
use aura_protocol::config_models::{AuraSettings, SimulationSettings};
use aura_protocol::ipc::Op;
use aura_protocol::log_models::LogEntry;
use aura_protocol::project_models::{ProjectData, RunMode};
use color_eyre::eyre::{bail, eyre};
use colored::Colorize;
use serde::Serialize;
use std::sync::Arc;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

/// Poll interval used with `--fast`.
const FAST_POLL_INTERVAL_MS: u64 = 250;

/// What `--json` prints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RunReport {
    outcome: &'static str,
    project: ProjectData,
    /// Newest first.
    logs: Vec<LogEntry>,
    is_processing: bool,
}

fn outcome_name(outcome: RunOutcome) -> &'static str {
    match outcome {
        RunOutcome::Completed => "completed",
        RunOutcome::CompletedWithFallback => "completed-with-fallback",
        RunOutcome::Failed => "failed",
        RunOutcome::Superseded => "cancelled",
    }
}

fn apply_flags(settings: &mut AuraSettings, args: &RunArgs) {
    if args.live {
        settings.run.mode = RunMode::Live;
    }
    if args.fast {
        settings.simulation = SimulationSettings::instant();
        settings.polling.interval_ms = settings.polling.interval_ms.min(FAST_POLL_INTERVAL_MS);
    }
}

pub async fn run(args: RunArgs) -> color_eyre::Result<()> {
    let mut settings = load_config(&args.root).await?.settings;
    apply_flags(&mut settings, &args);

    let store = Arc::new(ProjectStore::from_settings(&settings));
    let backend = HttpTaskBackend::new(&settings.backend)?;
    let generator = GeminiLessonGenerator::from_env(&settings.fallback)?;
    if settings.run.mode == RunMode::Live && !generator.has_credentials() {
        tracing::warn!(
            env = %settings.fallback.api_key_env,
            "No API key for direct generation; the fallback will fail"
        );
    }

    let orchestrator = Arc::new(PipelineOrchestrator::new(
        store.clone(),
        Arc::new(backend),
        Arc::new(generator),
        EngineSettings::from_settings(&settings),
    ));

    let mut events = BroadcastStream::new(store.subscribe());
    orchestrator.handle_op(Op::SetTopic { topic: args.topic });
    let Some(mut handle) = orchestrator.handle_op(Op::StartPipeline) else {
        bail!("the topic must not be empty");
    };

    let mut console = Console::default();
    let outcome = loop {
        tokio::select! {
            biased;
            Some(event) = events.next() => match event {
                Ok(event) => {
                    if !args.json {
                        console.handle(&event);
                    }
                }
                Err(e) => tracing::warn!("Console fell behind the event stream: {e}"),
            },
            outcome = &mut handle => break outcome?,
            _ = tokio::signal::ctrl_c() => {
                orchestrator.handle_op(Op::ResetProject);
                break handle.await?;
            }
        }
    };

    let snapshot = store.snapshot();
    if args.json {
        let report = RunReport {
            outcome: outcome_name(outcome),
            project: snapshot.project,
            logs: snapshot.logs,
            is_processing: snapshot.is_processing,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!();
        for line in summary(&snapshot.project) {
            println!("{line}");
        }
        if outcome == RunOutcome::CompletedWithFallback {
            println!(
                "{}",
                "Backend unavailable: script and code were generated directly, no video.".yellow()
            );
        }
    }

    match outcome {
        RunOutcome::Completed | RunOutcome::CompletedWithFallback => Ok(()),
        RunOutcome::Failed => Err(eyre!("pipeline failed")),
        RunOutcome::Superseded => Err(eyre!("pipeline cancelled")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args(live: bool, fast: bool) -> RunArgs {
        RunArgs {
            topic: "Chain Rule".to_string(),
            live,
            root: PathBuf::from("."),
            fast,
            json: false,
        }
    }

    #[test]
    fn test_flags_override_settings() {
        let mut settings = AuraSettings::default();
        apply_flags(&mut settings, &args(true, true));

        assert_eq!(settings.run.mode, RunMode::Live);
        assert_eq!(settings.simulation, SimulationSettings::instant());
        assert_eq!(settings.polling.interval_ms, FAST_POLL_INTERVAL_MS);
    }

    #[test]
    fn test_no_flags_keep_settings() {
        let mut settings = AuraSettings::default();
        settings.polling.interval_ms = 100;
        apply_flags(&mut settings, &args(false, false));

        assert_eq!(settings.run.mode, RunMode::Simulated);
        assert_eq!(settings.polling.interval_ms, 100);
        assert_eq!(settings.simulation, SimulationSettings::default());
    }
}
