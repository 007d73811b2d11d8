//! Common test utilities shared by the integration tests.
//!
//! This module provides:
//! - Fixtures (orchestrators wired to mock collaborators, temp projects)
//! - Assertions over the store's event stream
//! - Mock backends that need finer control than the scripted ones
//! - Local HTTP servers for the reqwest adapters

#[allow(dead_code)]
pub mod assertions;
pub mod fixtures;
#[allow(dead_code)]
pub mod http_server;
#[allow(dead_code)]
pub mod mock_backends;

#[allow(unused_imports)]
pub use assertions::*;
pub use fixtures::*;
#[allow(unused_imports)]
pub use http_server::*;
#[allow(unused_imports)]
pub use mock_backends::*;
