//! Pipeline stages

use serde::{Deserialize, Serialize};

/// The six stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Assessment,
    Objectives,
    WorkPlan,
    Orchestration,
    Execution,
    Rendering,
}

impl Stage {
    pub const ALL: [Stage; 6] = [
        Stage::Assessment,
        Stage::Objectives,
        Stage::WorkPlan,
        Stage::Orchestration,
        Stage::Execution,
        Stage::Rendering,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Assessment => "assessment",
            Stage::Objectives => "objectives",
            Stage::WorkPlan => "work_plan",
            Stage::Orchestration => "orchestration",
            Stage::Execution => "execution",
            Stage::Rendering => "rendering",
        }
    }

    /// 1-based position in the pipeline
    pub fn number(&self) -> usize {
        Stage::ALL.iter().position(|s| s == self).map_or(0, |i| i + 1)
    }

    pub fn description(&self) -> &'static str {
        match self {
            Stage::Assessment => "Assessing intent",
            Stage::Objectives => "Formulating objectives",
            Stage::WorkPlan => "Building work plan",
            Stage::Orchestration => "Orchestrating agents",
            Stage::Execution => "Executing agents",
            Stage::Rendering => "Rendering result",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_numbers() {
        assert_eq!(Stage::Assessment.number(), 1);
        assert_eq!(Stage::Rendering.number(), 6);
        assert_eq!(Stage::WorkPlan.to_string(), "work_plan");
    }
}
