//! Top-level pipeline value objects

pub mod envelope;
pub mod stage;
pub mod status;

pub use envelope::{CHAT_FALLBACK_REPLY, ObjectiveOutcome, ResultEnvelope};
pub use stage::Stage;
pub use status::{HistoryEntry, StatusConfig, SystemStatus};
