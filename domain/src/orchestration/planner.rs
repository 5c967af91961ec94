//! Orchestration plan construction

use std::time::Duration;

use super::entities::{
    AgentSpec, ExecutionMode, OrchestrationPlan, OutputFormat, Phase, ResourceLimits, RetryPolicy,
};
use super::topology::{dependency_levels, topological_order, validate_graph};
use crate::core::error::DomainError;
use crate::plan::WorkPlan;
use crate::prompt::PromptTemplate;

/// Tool name gated by the internet limit
pub const INTERNET_TOOL: &str = "internet";
/// Tool name gated by the code-execution limit
pub const CODE_TOOL: &str = "code";

/// Everything the orchestrator needs besides the plan
#[derive(Debug, Clone)]
pub struct OrchestrationSettings {
    /// Backend assigned to every agent
    pub backend: String,
    pub agent_timeout: Duration,
    pub retry_policy: RetryPolicy,
    pub enable_internet: bool,
    pub enable_code_execution: bool,
    pub resource_limits: ResourceLimits,
}

impl OrchestrationSettings {
    fn allows_tool(&self, tool: &str) -> bool {
        match tool {
            INTERNET_TOOL => self.enable_internet,
            CODE_TOOL => self.enable_code_execution,
            _ => true,
        }
    }
}

/// Map every step 1:1 to an agent and derive order and phases.
///
/// Duplicate step ids, unknown dependencies and cycles are errors.
pub fn build_orchestration_plan(
    plan: &WorkPlan,
    settings: &OrchestrationSettings,
) -> Result<OrchestrationPlan, DomainError> {
    validate_graph(&plan.steps)?;

    let agents: Vec<AgentSpec> = plan
        .steps
        .iter()
        .map(|step| {
            let tools: Vec<String> = step
                .required_capabilities
                .iter()
                .filter(|t| settings.allows_tool(t))
                .cloned()
                .collect();
            AgentSpec {
                id: AgentSpec::id_for_step(&step.id),
                name: format!("Agent for {}", step.description),
                step_id: step.id.clone(),
                system_prompt: PromptTemplate::agent_system(&tools),
                input_prompt: step.description.clone(),
                backend: settings.backend.clone(),
                tools,
                dependencies: step
                    .dependencies
                    .iter()
                    .map(|d| AgentSpec::id_for_step(d))
                    .collect(),
                timeout_secs: settings.agent_timeout.as_secs().max(1),
                retry_policy: settings.retry_policy,
                output_format: OutputFormat::Text,
            }
        })
        .collect();

    let execution_order = topological_order(&agents)?;
    let phases = build_phases(&agents, settings.resource_limits.parallel_execution)?;

    Ok(OrchestrationPlan {
        agents,
        execution_order,
        phases,
        resource_limits: settings.resource_limits,
    })
}

fn build_phases(agents: &[AgentSpec], parallel: bool) -> Result<Vec<Phase>, DomainError> {
    let levels = dependency_levels(agents)?;
    let phases = levels
        .into_iter()
        .enumerate()
        .map(|(i, members)| {
            let mode = if parallel && members.len() > 1 {
                ExecutionMode::Parallel
            } else {
                ExecutionMode::Sequential
            };
            Phase {
                id: format!("phase_{}", i + 1),
                agents: members,
                mode,
                dependencies: if i == 0 {
                    Vec::new()
                } else {
                    vec![format!("phase_{i}")]
                },
            }
        })
        .collect();
    Ok(phases)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{Step, WorkPlan};

    fn settings() -> OrchestrationSettings {
        OrchestrationSettings {
            backend: "openai".to_string(),
            agent_timeout: Duration::from_secs(1800),
            retry_policy: RetryPolicy::default(),
            enable_internet: true,
            enable_code_execution: true,
            resource_limits: ResourceLimits::default(),
        }
    }

    fn plan(n: usize) -> WorkPlan {
        let steps = (1..=n)
            .map(|i| {
                Step::new(format!("step_{i}"), format!("Execute: task {i}"))
                    .with_capabilities(["internet", "analysis"])
            })
            .collect();
        WorkPlan::new("workflow_1", steps)
    }

    #[test]
    fn test_one_agent_per_step() {
        let orch = build_orchestration_plan(&plan(3), &settings()).unwrap();
        assert_eq!(orch.agents.len(), 3);
        assert_eq!(orch.agents[0].id, "agent_step_1");
        assert_eq!(orch.agents[0].input_prompt, "Execute: task 1");
        assert_eq!(orch.agents[0].name, "Agent for Execute: task 1");
        assert_eq!(orch.agents[0].backend, "openai");
        assert_eq!(orch.agents[0].timeout_secs, 1800);
        assert_eq!(orch.agents[0].retry_policy.max_attempts, 3);
        assert_eq!(
            orch.execution_order,
            vec!["agent_step_1", "agent_step_2", "agent_step_3"]
        );
    }

    #[test]
    fn test_flat_plan_single_sequential_phase() {
        let orch = build_orchestration_plan(&plan(3), &settings()).unwrap();
        assert_eq!(orch.phases.len(), 1);
        assert_eq!(orch.phases[0].id, "phase_1");
        assert_eq!(orch.phases[0].agents.len(), 3);
        assert_eq!(orch.phases[0].mode, ExecutionMode::Sequential);
    }

    #[test]
    fn test_parallel_mode_when_enabled() {
        let mut s = settings();
        s.resource_limits.parallel_execution = true;
        let orch = build_orchestration_plan(&plan(2), &s).unwrap();
        assert_eq!(orch.phases[0].mode, ExecutionMode::Parallel);

        let single = build_orchestration_plan(&plan(1), &s).unwrap();
        assert_eq!(single.phases[0].mode, ExecutionMode::Sequential);
    }

    #[test]
    fn test_internet_disabled_drops_tool() {
        let mut s = settings();
        s.enable_internet = false;
        let orch = build_orchestration_plan(&plan(1), &s).unwrap();
        assert_eq!(orch.agents[0].tools, vec!["analysis"]);
        assert!(!orch.agents[0].system_prompt.contains("internet"));
    }

    #[test]
    fn test_dependencies_reorder_and_phase() {
        let p = plan(3)
            .with_dependency("step_1", "step_3")
            .unwrap();
        let orch = build_orchestration_plan(&p, &settings()).unwrap();
        assert_eq!(
            orch.execution_order,
            vec!["agent_step_2", "agent_step_3", "agent_step_1"]
        );
        assert_eq!(orch.phases.len(), 2);
        assert_eq!(orch.phases[0].agents, vec!["agent_step_2", "agent_step_3"]);
        assert_eq!(orch.phases[1].agents, vec!["agent_step_1"]);
        assert_eq!(orch.phases[1].dependencies, vec!["phase_1"]);
        assert_eq!(orch.agents[0].dependencies, vec!["agent_step_3"]);
    }

    #[test]
    fn test_cycle_is_fatal() {
        let p = plan(2)
            .with_dependency("step_1", "step_2")
            .unwrap()
            .with_dependency("step_2", "step_1")
            .unwrap();
        let err = build_orchestration_plan(&p, &settings()).unwrap_err();
        assert!(matches!(err, DomainError::DependencyCycle(_)));
    }

    #[test]
    fn test_duplicate_step_is_fatal() {
        let p = WorkPlan::new(
            "w",
            vec![Step::new("step_1", "a"), Step::new("step_1", "b")],
        );
        assert_eq!(
            build_orchestration_plan(&p, &settings()),
            Err(DomainError::DuplicateStepId("step_1".into()))
        );
    }
}
