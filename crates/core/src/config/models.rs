//! Loaded configuration together with where it came from.

use aura_protocol::config_models::AuraSettings;
use std::path::PathBuf;

/// Settings loaded from a project root.
///
/// # Example
///
/// ```rust,no_run
/// use aura_core::config::loader::load_config;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new(".")).await?;
/// println!("Backend at {}", config.settings.backend.base_url);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedConfig {
    /// Effective settings; defaults wherever the file is silent.
    pub settings: AuraSettings,

    /// The `config.toml` that was read, if there was one.
    pub source: Option<PathBuf>,
}

impl LoadedConfig {
    pub fn is_default(&self) -> bool {
        self.source.is_none()
    }
}
