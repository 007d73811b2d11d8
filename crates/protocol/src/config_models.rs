//! Settings models for `.aura/config.toml`.
//!
//! Every field has a default, so a missing file, a missing section or a
//! missing key all fall back to the values a local development setup
//! expects (FastAPI backend on localhost, simulated mode).

use serde::Deserialize;
use serde::Serialize;
use std::time::Duration;
use ts_rs::TS;

use crate::project_models::RunMode;

/// Represents all settings from `.aura/config.toml`.
///
/// # Example
///
/// ```toml
/// # .aura/config.toml
/// [run]
/// mode = "live"
///
/// [backend]
/// base-url = "http://localhost:8000/api/v1"
///
/// [polling]
/// interval-ms = 2000
/// max-consecutive-failures = 5
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, TS)]
#[serde(default, rename_all = "kebab-case")]
pub struct AuraSettings {
    pub run: RunSettings,
    pub backend: BackendSettings,
    pub polling: PollingSettings,
    pub simulation: SimulationSettings,
    pub logs: LogSettings,
    pub fallback: FallbackSettings,
}

/// Initial state of the run-mode flag.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, TS)]
#[serde(default, rename_all = "kebab-case")]
pub struct RunSettings {
    pub mode: RunMode,
}

/// Where the remote task backend lives.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
#[serde(default, rename_all = "kebab-case")]
pub struct BackendSettings {
    /// Base URL of the task API, without a trailing slash.
    pub base_url: String,

    /// Per-request timeout.
    pub request_timeout_ms: u64,
}

impl BackendSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api/v1".to_string(),
            request_timeout_ms: 30_000,
        }
    }
}

/// Bounds on the live status poll loop.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
#[serde(default, rename_all = "kebab-case")]
pub struct PollingSettings {
    /// Wait between two status requests.
    pub interval_ms: u64,

    /// Total number of status requests before the run is abandoned.
    pub max_attempts: u32,

    /// Failed status requests in a row before the run is abandoned.
    pub max_consecutive_failures: u32,
}

impl PollingSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self {
            interval_ms: 2_000,
            max_attempts: 900,
            max_consecutive_failures: 5,
        }
    }
}

/// Latency of each step of the simulated run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
#[serde(default, rename_all = "kebab-case")]
pub struct SimulationSettings {
    /// One delay per step: scripting, voice, visuals, avatar, export.
    pub step_delays_ms: [u64; 5],
}

impl SimulationSettings {
    /// Simulation without any waiting, for tests and quick demos.
    pub fn instant() -> Self {
        Self {
            step_delays_ms: [0; 5],
        }
    }

    pub fn step_delay(&self, step: usize) -> Duration {
        Duration::from_millis(self.step_delays_ms.get(step).copied().unwrap_or(0))
    }
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            step_delays_ms: [2_000, 1_500, 2_000, 1_500, 0],
        }
    }
}

/// Retention of the in-memory log stream.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
#[serde(default, rename_all = "kebab-case")]
pub struct LogSettings {
    /// Oldest entries are evicted beyond this many.
    pub max_entries: usize,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self { max_entries: 500 }
    }
}

/// Direct lesson generation used when the backend is unreachable.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
#[serde(default, rename_all = "kebab-case")]
pub struct FallbackSettings {
    /// Generation model name.
    pub model: String,

    /// Environment variable holding the API key.
    pub api_key_env: String,

    /// Base URL of the generation API.
    pub base_url: String,

    /// Timeout of the whole generation request.
    pub request_timeout_ms: u64,
}

impl FallbackSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for FallbackSettings {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            request_timeout_ms: 60_000,
        }
    }
}
