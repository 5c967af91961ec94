//! Quorum consensus for intent classification
//!
//! Several independent voters (every backend that answered, plus the
//! pattern phase) classify the same prompt; their votes are combined into
//! one assessment.
//!
//! ```text
//! ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────┐
//! │ openai   │  │ groq     │  │ gemini   │  │ pattern  │
//! └────┬─────┘  └────┬─────┘  └────┬─────┘  └────┬─────┘
//!      │ parse / lexical fallback  │             │
//!      └─────────────┴──────┬──────┴─────────────┘
//!                           ▼
//!               majority vote, confidence tie-break
//! ```

pub mod consensus;
pub mod parsing;
pub mod vote;

pub use consensus::{MAJORITY_CONFIDENCE_CAP, TIE_CONFIDENCE_CAP, consensus_decision};
pub use parsing::{
    LEXICAL_FALLBACK_CONFIDENCE, assess_backend_response, lexical_intent_fallback,
    parse_intent_response,
};
pub use vote::VoteTally;
