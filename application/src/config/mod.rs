//! Application-level configuration.
//!
//! - [`ExecutionParams`]: agent execution and deadline control
//! - [`PipelineConfig`]: static configuration a pipeline is built with
//! - [`ProcessLimits`]: per-request limits and context

pub mod execution_params;
pub mod limits;
pub mod pipeline_config;

pub use execution_params::ExecutionParams;
pub use limits::ProcessLimits;
pub use pipeline_config::PipelineConfig;
