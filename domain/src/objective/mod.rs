//! Objective formulation domain (stage 2)
//!
//! Candidates extracted by each backend are parsed, pooled per category,
//! deduplicated, capped, guarded against emptiness and finally enriched
//! with mechanically generated success criteria and outcomes.

pub mod dedup;
pub mod entities;
pub mod parsing;
pub mod synthesis;

pub use dedup::{deduplicate, is_similar, jaccard_similarity};
pub use entities::{ExpectedOutcome, ObjectiveCandidate, ObjectiveSet};
pub use parsing::{extract_bullet_objectives, parse_candidate, parse_objective_response};
pub use synthesis::{formulate_objectives, synthesize_candidates};
