//! Test fixtures for creating orchestrators and sample projects.

use aura_core::backend::base::{LessonGenerator, TaskBackend};
use aura_core::engine::{EngineSettings, PipelineOrchestrator};
use aura_core::state::ProjectStore;
use aura_protocol::config_models::{PollingSettings, SimulationSettings};
use aura_protocol::ipc::Event;
use aura_protocol::project_models::{RunMode, ScriptContent};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::broadcast;

/// Engine settings without any waiting.
pub fn fast_settings() -> EngineSettings {
    EngineSettings {
        polling: PollingSettings {
            interval_ms: 0,
            ..PollingSettings::default()
        },
        simulation: SimulationSettings::instant(),
    }
}

/// An orchestrator over a fresh store in `mode`.
pub fn create_orchestrator(
    mode: RunMode,
    backend: Arc<dyn TaskBackend>,
    generator: Arc<dyn LessonGenerator>,
    settings: EngineSettings,
) -> Arc<PipelineOrchestrator> {
    let store = Arc::new(ProjectStore::new(mode, 500));
    Arc::new(PipelineOrchestrator::new(store, backend, generator, settings))
}

/// A three-part script whose every part mentions `tag`.
#[allow(dead_code)]
pub fn tagged_script(tag: &str) -> ScriptContent {
    ScriptContent {
        intro: format!("{tag} intro"),
        explanation: format!("{tag} explanation"),
        conclusion: format!("{tag} conclusion"),
    }
}

/// Everything published on `rx` so far.
pub fn drain_events(rx: &mut broadcast::Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Create a temporary project root with `.aura/config.toml` set to `config`.
///
/// Returns a TempDir that must be kept alive for the test duration.
#[allow(dead_code)]
pub fn create_test_project(config: &str) -> std::io::Result<TempDir> {
    let temp_dir = tempfile::tempdir()?;
    let aura_dir = temp_dir.path().join(".aura");
    std::fs::create_dir_all(&aura_dir)?;
    std::fs::write(aura_dir.join("config.toml"), config)?;
    Ok(temp_dir)
}
