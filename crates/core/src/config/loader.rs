//! Configuration file loader for the `.aura/` directory.
//!
//! Only `config.toml` is read. Every section and key is optional; what the
//! file leaves out keeps its default value.

use crate::config::error::ConfigError;
use crate::config::error::ConfigResult;
use crate::config::models::LoadedConfig;
use aura_protocol::config_models::AuraSettings;
use std::path::Path;

/// Name of the configuration directory under a project root.
pub const CONFIG_DIR: &str = ".aura";

/// Name of the settings file inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.toml";

/// Loads the settings of the project at `root`.
///
/// # Arguments
///
/// * `root` - Root directory containing the `.aura/` folder
///
/// # Returns
///
/// A `LoadedConfig` with the effective settings. If `.aura/` or
/// `config.toml` is missing, the default settings are returned rather than
/// an error.
///
/// # Errors
///
/// Returns `ConfigError` if:
/// - The file exists but cannot be read
/// - The file has invalid TOML syntax or mistyped values
/// - A value is out of range (for example an empty backend URL)
///
/// # Example
///
/// ```rust,no_run
/// use aura_core::config::loader::load_config;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new(".")).await?;
/// println!("Polling every {} ms", config.settings.polling.interval_ms);
/// # Ok(())
/// # }
/// ```
pub async fn load_config(root: &Path) -> ConfigResult<LoadedConfig> {
    let config_path = root.join(CONFIG_DIR).join(CONFIG_FILE);

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config file, using defaults");
        return Ok(LoadedConfig::default());
    }

    let content =
        std::fs::read_to_string(&config_path).map_err(|source| ConfigError::FileRead {
            path: config_path.clone(),
            source,
        })?;

    let settings: AuraSettings =
        toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
            path: config_path.clone(),
            source,
        })?;

    if let Err(reason) = validate(&settings) {
        return Err(ConfigError::InvalidConfig {
            path: config_path,
            reason,
        });
    }

    tracing::debug!(path = %config_path.display(), "Loaded config file");
    Ok(LoadedConfig {
        settings,
        source: Some(config_path),
    })
}

fn validate(settings: &AuraSettings) -> Result<(), String> {
    if settings.backend.base_url.trim().is_empty() {
        return Err("backend.base-url must not be empty".to_string());
    }
    if settings.polling.max_attempts == 0 {
        return Err("polling.max-attempts must be at least 1".to_string());
    }
    if settings.polling.max_consecutive_failures == 0 {
        return Err("polling.max-consecutive-failures must be at least 1".to_string());
    }
    if settings.logs.max_entries == 0 {
        return Err("logs.max-entries must be at least 1".to_string());
    }
    if settings.fallback.api_key_env.trim().is_empty() {
        return Err("fallback.api-key-env must name an environment variable".to_string());
    }
    if settings.fallback.request_timeout_ms == 0 {
        return Err("fallback.request-timeout-ms must be at least 1".to_string());
    }
    Ok(())
}
