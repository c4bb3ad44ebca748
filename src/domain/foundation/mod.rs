//! Shared value objects and error types used across domain modules.

mod errors;
mod ids;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ScenarioId, SessionId, StageNumber, UserId};
pub use timestamp::Timestamp;
