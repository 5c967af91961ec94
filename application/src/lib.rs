//! Application layer for eskai
//!
//! This crate contains the pipeline use cases, port definitions, the
//! backend pool, the tool table and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod pool;
pub mod ports;
pub mod tools;
pub mod use_cases;

// Re-export commonly used types
pub use config::{ExecutionParams, PipelineConfig, ProcessLimits};
pub use pool::{BackendPool, PoolError};
pub use ports::{
    backend::{Backend, BackendError, GenerateOptions},
    history::{ExecutionHistory, NoHistory},
    progress::{NoProgress, PipelineProgress},
    tool::{ToolAction, ToolError},
};
pub use tools::ToolTable;
pub use use_cases::assess_intent::AssessIntentUseCase;
pub use use_cases::execute_agents::{AgentError, ExecuteAgentsUseCase};
pub use use_cases::formulate_objectives::FormulateObjectivesUseCase;
pub use use_cases::orchestrate_agents::OrchestrateAgentsUseCase;
pub use use_cases::process_prompt::{Pipeline, PipelineError};
pub use use_cases::render_result::RenderResultUseCase;
