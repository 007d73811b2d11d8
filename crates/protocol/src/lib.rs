//! # aura-protocol
//!
//! Core protocol definitions and data models for the aura pipeline.
//!
//! This crate defines all shared data structures used for:
//! - The project moving through the pipeline and its stages
//! - The structured log stream shown to the user
//! - Communication between a rendering surface and the Core
//! - Settings parsed from `.aura/config.toml`
//!
//! ## Modules
//!
//! - [`stage_models`]: Pipeline stage enum and canonical order
//! - [`project_models`]: Project data, partial updates and run mode
//! - [`log_models`]: Log entries and severities
//! - [`config_models`]: Settings from config.toml
//! - [`ipc`]: Operations and Events for surface-Core communication
//!
//! ## Design Principles
//!
//! - Minimal dependencies: Only serde, ts-rs, chrono and uuid
//! - TypeScript generation: All types derive `TS` for client compatibility
//! - Independent compilation: No dependencies on other aura crates

pub mod config_models;
pub mod ipc;
pub mod log_models;
pub mod project_models;
pub mod stage_models;

// Re-export all public types for convenience
pub use config_models::*;
pub use ipc::*;
pub use log_models::*;
pub use project_models::*;
pub use stage_models::*;
