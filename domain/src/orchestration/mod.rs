//! Orchestration domain (stage 4)
//!
//! Binds plan steps to executable agent specifications, orders them
//! topologically and groups them into phases by dependency depth.

pub mod entities;
pub mod planner;
pub mod topology;

pub use entities::{
    AgentSpec, ExecutionMode, OrchestrationPlan, OutputFormat, Phase, ResourceLimits, RetryPolicy,
};
pub use planner::{OrchestrationSettings, build_orchestration_plan};
pub use topology::{DependencyNode, dependency_levels, topological_order, validate_graph};
