//! Training session command and query handlers.

mod end_scenario;
mod get_session;
mod respond;
mod start_scenario;

pub use end_scenario::{EndScenarioCommand, EndScenarioError, EndScenarioHandler, EndScenarioResult};
pub use get_session::{GetSessionError, GetSessionHandler, GetSessionQuery, SessionView};
pub use respond::{RespondCommand, RespondError, RespondHandler, RespondResult};
pub use start_scenario::{
    StartScenarioCommand, StartScenarioError, StartScenarioHandler, StartScenarioResult,
};
