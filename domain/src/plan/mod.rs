//! Work plan domain (stage 3)

pub mod builder;
pub mod entities;

pub use builder::build_work_plan;
pub use entities::{Step, StepType, WorkPlan};
