//! Training session aggregate and persona prompting.

mod aggregate;
mod prompt;

pub use aggregate::{SessionState, TrainingSession, TranscriptEntry, TurnRole};
pub use prompt::{session_summary, PersonaPromptTemplate, DEFAULT_PERSONA_TEMPLATE};
