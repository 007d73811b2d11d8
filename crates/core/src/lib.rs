//! # aura-core
//!
//! Core pipeline engine and project state for Aura.
//!
//! This crate provides:
//! - Configuration loading from the `.aura/` directory
//! - The project state store and its event stream
//! - Mapping of remote task statuses onto pipeline stages
//! - The pipeline orchestrator (simulated and live runs)
//! - Task backend and lesson generator collaborators
//!
//! ## Modules
//!
//! - [`config`]: Configuration loading and management
//! - [`state`]: Project state store
//! - [`stage`]: Remote status mapping
//! - [`engine`]: Pipeline orchestrator
//! - [`backend`]: External collaborators and their implementations

pub mod backend;
pub mod config;
pub mod engine;
pub mod stage;
pub mod state;
