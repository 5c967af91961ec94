//! Port definitions (interfaces for external systems)
//!
//! Ports define the boundaries between the application layer and
//! infrastructure. Adapters in the infrastructure layer implement these ports.

pub mod backend;
pub mod history;
pub mod progress;
pub mod tool;
