//! Execution domain (stage 5)
//!
//! Per-agent state machine and the run report the engine produces.
//!
//! ```text
//! pending ──▶ running ──┬──▶ completed
//!                       ├──▶ failed
//!                       └──▶ timed_out
//! ```

pub mod entities;
pub mod metrics;

pub use entities::{AgentRecord, AgentStatus, ExecutionReport, RunStatus};
pub use metrics::PerformanceMetrics;
