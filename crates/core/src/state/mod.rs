//! State management for the active project.
//!
//! This module provides:
//! - Project state machine functions
//! - Run tokens used to discard effects of superseded runs
//! - ProjectStore, the single source of truth read by the rendering surface

pub mod project;
pub mod run;
pub mod store;

pub use run::{RunToken, Superseded};
pub use store::{ProjectStore, StoreSnapshot};
