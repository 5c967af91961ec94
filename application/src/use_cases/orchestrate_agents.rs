//! Orchestrate Agents use case (stage 4)

use std::sync::Arc;

use eskai_domain::{
    OrchestrationPlan, OrchestrationSettings, ResourceLimits, WorkPlan, build_orchestration_plan,
};
use tracing::info;

use crate::config::{ExecutionParams, ProcessLimits};
use crate::pool::BackendPool;
use crate::tools::ToolTable;
use crate::use_cases::process_prompt::PipelineError;

/// Use case for binding plan steps to agent specifications
pub struct OrchestrateAgentsUseCase {
    pool: Arc<BackendPool>,
    tools: Arc<ToolTable>,
    params: ExecutionParams,
}

impl OrchestrateAgentsUseCase {
    pub fn new(pool: Arc<BackendPool>, tools: Arc<ToolTable>, params: ExecutionParams) -> Self {
        Self {
            pool,
            tools,
            params,
        }
    }

    /// Build the orchestration plan.
    ///
    /// Fails on an invalid plan graph or a tool with no registered action;
    /// both abort the run before anything executes.
    pub fn execute(
        &self,
        plan: &WorkPlan,
        limits: &ProcessLimits,
    ) -> Result<OrchestrationPlan, PipelineError> {
        let primary = self.pool.primary()?;
        let settings = OrchestrationSettings {
            backend: primary.name().to_string(),
            agent_timeout: self.params.agent_timeout,
            retry_policy: self.params.retry_policy(),
            enable_internet: limits.enable_internet,
            enable_code_execution: limits.enable_code_execution,
            resource_limits: ResourceLimits {
                max_concurrent_agents: self.params.max_concurrent_agents,
                parallel_execution: self.params.enable_parallel_execution,
            },
        };

        let orchestration = build_orchestration_plan(plan, &settings)?;
        for agent in &orchestration.agents {
            self.tools.validate(&agent.tools)?;
        }

        info!(
            agents = orchestration.agents.len(),
            phases = orchestration.phases.len(),
            backend = %settings.backend,
            "Agents orchestrated"
        );
        Ok(orchestration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::backend::{Backend, BackendError, GenerateOptions};
    use crate::ports::tool::{ToolAction, ToolError};
    use async_trait::async_trait;
    use eskai_domain::{BackendProfile, DomainError, Step};
    use serde_json::Value;

    struct IdleBackend(BackendProfile);

    #[async_trait]
    impl Backend for IdleBackend {
        fn profile(&self) -> &BackendProfile {
            &self.0
        }

        async fn generate(
            &self,
            _prompt: &str,
            _options: &GenerateOptions,
        ) -> Result<String, BackendError> {
            Ok(String::new())
        }
    }

    struct NoopTool;

    #[async_trait]
    impl ToolAction for NoopTool {
        fn description(&self) -> &str {
            "noop"
        }

        async fn invoke(&self, _args: &Value) -> Result<Value, ToolError> {
            Ok(Value::Null)
        }
    }

    fn use_case(tool_names: &[&str]) -> OrchestrateAgentsUseCase {
        let backends: Vec<Arc<dyn Backend>> = vec![
            Arc::new(IdleBackend(BackendProfile::new("groq", "m", 0.7))),
            Arc::new(IdleBackend(BackendProfile::new("gemini", "m", 0.7))),
        ];
        let pool = BackendPool::new(backends).unwrap().with_priority(["gemini"]);
        let mut tools = ToolTable::new();
        for name in tool_names {
            tools.register(name, "run", Arc::new(NoopTool)).unwrap();
        }
        OrchestrateAgentsUseCase::new(Arc::new(pool), Arc::new(tools), ExecutionParams::default())
    }

    fn work_plan() -> WorkPlan {
        WorkPlan::new(
            "workflow_1",
            vec![
                Step::new("step_1", "Research").with_capabilities(["internet", "analysis"]),
                Step::new("step_2", "Write").with_capabilities(["analysis"]),
            ],
        )
    }

    #[test]
    fn test_agents_bound_to_primary_backend() {
        let plan = use_case(&["internet", "analysis"])
            .execute(&work_plan(), &ProcessLimits::default())
            .unwrap();
        assert_eq!(plan.agents.len(), 2);
        assert!(plan.agents.iter().all(|a| a.backend == "gemini"));
        assert_eq!(plan.execution_order, vec!["agent_step_1", "agent_step_2"]);
        assert_eq!(plan.agents[0].retry_policy.max_attempts, 3);
    }

    #[test]
    fn test_disabled_internet_needs_no_fetch_tool() {
        let plan = use_case(&["analysis"])
            .execute(&work_plan(), &ProcessLimits::default().without_internet())
            .unwrap();
        assert_eq!(plan.agents[0].tools, vec!["analysis"]);
    }

    #[test]
    fn test_unregistered_tool_is_rejected() {
        let err = use_case(&["analysis"])
            .execute(&work_plan(), &ProcessLimits::default())
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::InvalidTool(ToolError::Unknown { ref tool, .. }) if tool == "internet"
        ));
    }

    #[test]
    fn test_cycle_is_fatal() {
        let plan = work_plan()
            .with_dependency("step_1", "step_2")
            .unwrap()
            .with_dependency("step_2", "step_1")
            .unwrap();
        let err = use_case(&["internet", "analysis"])
            .execute(&plan, &ProcessLimits::default())
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::InvalidPlan(DomainError::DependencyCycle(_))
        ));
    }
}
