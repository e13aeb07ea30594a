//! swagger-host — serves a configured Swagger UI page for an OpenAPI document.
//!
//! The binary entry point is `src/main.rs`; the library exposes the pieces
//! for embedding and for integration tests.

pub mod bootstrap;
pub mod core;
#[cfg(feature = "server")]
pub mod server;
pub mod ui;

pub use crate::bootstrap::logger;
pub use crate::core::{config, error};
