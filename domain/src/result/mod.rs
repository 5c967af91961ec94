//! Result rendering domain (stage 6)

pub mod entities;
pub mod scoring;

pub use entities::{
    AlignmentStatus, ExecutionSummary, FinalResult, ObjectiveAlignment, ObjectiveAssessment,
    SupportingEvidence,
};
pub use scoring::{
    ADDRESSED_THRESHOLD, NO_RESULTS_MESSAGE, alignment_score, completeness_score,
    fallback_synthesis, validate_alignment,
};
