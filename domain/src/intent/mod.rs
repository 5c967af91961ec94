//! Intent assessment domain (stage 1)
//!
//! A prompt is either small talk (`chat`) or a request that needs the full
//! pipeline (`objective`). The pattern phase lives here; the multi-backend
//! vote lives in [`crate::quorum`].

pub mod assessment;
pub mod patterns;

pub use assessment::{Assessment, AssessmentMethod, Intent};
pub use patterns::{QUICK_DECISION_THRESHOLD, quick_pattern_assessment};
