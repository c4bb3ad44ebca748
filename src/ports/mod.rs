//! Ports: capability interfaces implemented by adapters.

mod ai_provider;
mod evaluation_log;
mod session_repository;
mod user_directory;

pub use ai_provider::{
    AiError, AiProvider, CompletionRequest, CompletionResponse, Message, MessageRole,
    ProviderInfo, TokenUsage,
};
pub use evaluation_log::{EvaluationLog, EvaluationRecord};
pub use session_repository::SessionRepository;
pub use user_directory::{UserDirectory, UserRecord};
