//! External collaborators of the pipeline.
//!
//! This module provides:
//! - The `TaskBackend` and `LessonGenerator` traits
//! - The validated wire schema of the task backend
//! - HTTP and Gemini implementations
//! - The canned lesson of the simulated run
//! - Scripted implementations for tests and demos

pub mod base;
pub mod gemini;
pub mod http;
pub mod mock;
pub mod schema;
pub mod simulated;

pub use base::{
    BackendError, GenerationError, LessonGenerator, LessonPlan, RemoteStatus, TaskBackend,
    TaskTicket,
};
pub use gemini::GeminiLessonGenerator;
pub use http::HttpTaskBackend;
pub use mock::{ScriptedBackend, StaticGenerator};
pub use simulated::SimulatedLesson;
