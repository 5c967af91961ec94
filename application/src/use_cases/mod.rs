//! Use cases (application services)
//!
//! One use case per pipeline stage, plus [`process_prompt::Pipeline`]
//! which runs them in order.

pub mod assess_intent;
pub mod execute_agents;
pub mod formulate_objectives;
pub mod orchestrate_agents;
pub mod process_prompt;
pub mod render_result;
