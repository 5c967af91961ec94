//! Work plan entities

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::error::DomainError;
use crate::orchestration::topology::{DependencyNode, topological_order};

/// Kind of work a step performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepType {
    Research,
    Analysis,
    Creation,
    #[default]
    Execution,
}

impl StepType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepType::Research => "research",
            StepType::Analysis => "analysis",
            StepType::Creation => "creation",
            StepType::Execution => "execution",
        }
    }
}

/// A single unit of work in a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Unique within the owning plan
    pub id: String,
    pub description: String,
    #[serde(rename = "type")]
    pub step_type: StepType,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub required_capabilities: Vec<String>,
    pub estimated_duration: String,
    pub success_criteria: String,
}

impl Step {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            step_type: StepType::Execution,
            dependencies: Vec::new(),
            required_capabilities: Vec::new(),
            estimated_duration: String::new(),
            success_criteria: String::new(),
        }
    }

    pub fn with_capabilities<I, S>(mut self, capabilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_capabilities = capabilities.into_iter().map(Into::into).collect();
        self
    }

    pub fn depends_on(&self, step_id: &str) -> bool {
        self.dependencies.iter().any(|d| d == step_id)
    }
}

impl DependencyNode for Step {
    fn node_id(&self) -> &str {
        &self.id
    }

    fn node_dependencies(&self) -> &[String] {
        &self.dependencies
    }
}

/// Ordered task graph derived from the primary objectives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkPlan {
    pub id: String,
    pub steps: Vec<Step>,
    /// Ordered step ids
    pub critical_path: Vec<String>,
    /// Group name to step ids; empty unless concurrency is declared
    #[serde(default)]
    pub parallel_groups: BTreeMap<String, Vec<String>>,
}

impl WorkPlan {
    pub fn new(id: impl Into<String>, steps: Vec<Step>) -> Self {
        let critical_path = steps.iter().map(|s| s.id.clone()).collect();
        Self {
            id: id.into(),
            steps,
            critical_path,
            parallel_groups: BTreeMap::new(),
        }
    }

    pub fn step(&self, id: &str) -> Option<&Step> {
        self.steps.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Declare that `step_id` runs after `depends_on`.
    ///
    /// Both steps must already exist. The critical path is reordered to
    /// respect the dependencies. Cycles are not rejected here; the critical
    /// path then stays as it was and the orchestrator rejects the plan.
    pub fn with_dependency(mut self, step_id: &str, depends_on: &str) -> Result<Self, DomainError> {
        if self.step(depends_on).is_none() {
            return Err(DomainError::UnknownDependency {
                step: step_id.to_string(),
                dependency: depends_on.to_string(),
            });
        }
        let step = self
            .steps
            .iter_mut()
            .find(|s| s.id == step_id)
            .ok_or_else(|| DomainError::UnknownDependency {
                step: step_id.to_string(),
                dependency: depends_on.to_string(),
            })?;
        if !step.depends_on(depends_on) {
            step.dependencies.push(depends_on.to_string());
        }
        if let Ok(order) = topological_order(&self.steps) {
            self.critical_path = order;
        }
        Ok(self)
    }
}
