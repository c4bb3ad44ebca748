//! In-memory adapters for tests and single-process deployments.

mod evaluation_log;
mod session_store;
mod user_directory;

pub use evaluation_log::InMemoryEvaluationLog;
pub use session_store::InMemorySessionStore;
pub use user_directory::InMemoryUserDirectory;
