//! Prompt domain
//!
//! Templates for every backend call the pipeline makes.

mod template;

pub use template::PromptTemplate;
