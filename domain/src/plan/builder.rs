//! Work plan construction
//!
//! One step per primary objective, in objective order, with no
//! dependencies. Ordering hints inside objective text are not interpreted;
//! callers that need dependencies add them with [`WorkPlan::with_dependency`].

use super::entities::{Step, StepType, WorkPlan};
use crate::objective::ObjectiveSet;

/// Capabilities every generated step asks for
pub const DEFAULT_STEP_CAPABILITIES: [&str; 2] = ["internet", "analysis"];
/// Estimated duration attached to every generated step
pub const DEFAULT_STEP_DURATION: &str = "30 minutes";

/// Build the work plan for an objective set
pub fn build_work_plan(objectives: &ObjectiveSet) -> WorkPlan {
    let steps = objectives
        .primary_objectives
        .iter()
        .enumerate()
        .map(|(i, objective)| Step {
            id: format!("step_{}", i + 1),
            description: format!("Execute: {objective}"),
            step_type: StepType::Execution,
            dependencies: Vec::new(),
            required_capabilities: DEFAULT_STEP_CAPABILITIES
                .iter()
                .map(|c| c.to_string())
                .collect(),
            estimated_duration: DEFAULT_STEP_DURATION.to_string(),
            success_criteria: format!("Complete {objective}"),
        })
        .collect();

    WorkPlan::new(plan_id(&objectives.primary_objectives), steps)
}

/// `workflow_<n>` derived from a stable FNV-1a hash of the objective texts
fn plan_id(objectives: &[String]) -> String {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    let hash = objectives
        .iter()
        .flat_map(|o| o.bytes().chain(std::iter::once(0)))
        .fold(OFFSET, |h, b| (h ^ u64::from(b)).wrapping_mul(PRIME));
    format!("workflow_{}", hash % 1_000_000)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn objectives(primary: &[&str]) -> ObjectiveSet {
        ObjectiveSet {
            primary_objectives: primary.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_one_step_per_objective() {
        let plan = build_work_plan(&objectives(&["Research market", "Draft roadmap"]));
        assert_eq!(plan.steps.len(), 2);
        assert_eq!(plan.steps[0].id, "step_1");
        assert_eq!(plan.steps[1].description, "Execute: Draft roadmap");
        assert_eq!(plan.steps[1].success_criteria, "Complete Draft roadmap");
        assert_eq!(plan.steps[0].required_capabilities, vec!["internet", "analysis"]);
        assert_eq!(plan.steps[0].estimated_duration, "30 minutes");
        assert!(plan.steps.iter().all(|s| s.dependencies.is_empty()));
    }

    #[test]
    fn test_flat_plan_metadata() {
        let plan = build_work_plan(&objectives(&["a", "b", "c"]));
        assert_eq!(plan.critical_path, vec!["step_1", "step_2", "step_3"]);
        assert!(plan.parallel_groups.is_empty());
    }

    #[test]
    fn test_plan_id_is_stable() {
        let a = build_work_plan(&objectives(&["Research market"]));
        let b = build_work_plan(&objectives(&["Research market"]));
        let c = build_work_plan(&objectives(&["Something else"]));
        assert_eq!(a.id, b.id);
        assert_ne!(a.id, c.id);
        assert!(a.id.starts_with("workflow_"));
    }

    #[test]
    fn test_empty_objectives_empty_plan() {
        let plan = build_work_plan(&ObjectiveSet::default());
        assert!(plan.is_empty());
        assert!(plan.critical_path.is_empty());
    }
}
