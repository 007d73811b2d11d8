//! Configuration loading and management.
//!
//! This module loads the settings of the pipeline from the `.aura/`
//! directory of a project root.

pub mod error;
pub mod loader;
pub mod models;

pub use error::{ConfigError, ConfigResult};
pub use loader::load_config;
pub use models::LoadedConfig;
