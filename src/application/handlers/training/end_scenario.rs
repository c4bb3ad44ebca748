//! EndScenario command handler.
//!
//! Marks the session ended and returns a deterministic summary. Ending is
//! idempotent: repeating the call returns the same summary and count
//! without touching the stored transcript.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::domain::catalog::ContentCatalog;
use crate::domain::foundation::SessionId;
use crate::domain::session::session_summary;
use crate::ports::SessionRepository;

/// Command to end a training session.
#[derive(Debug, Clone)]
pub struct EndScenarioCommand {
    pub session_id: SessionId,
}

/// Errors that can occur when ending a session.
#[derive(Debug, Clone, Error)]
pub enum EndScenarioError {
    /// No session with this id exists.
    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    /// The end transition could not be persisted.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

/// Result of ending a session.
#[derive(Debug, Clone)]
pub struct EndScenarioResult {
    pub session_completed: bool,
    /// Human-readable recap of the session.
    pub summary: String,
    /// Total turns in the transcript, opening line included.
    pub messages_exchanged: usize,
    pub scenario_title: String,
}

/// Handler for EndScenario commands.
pub struct EndScenarioHandler {
    catalog: Arc<ContentCatalog>,
    sessions: Arc<dyn SessionRepository>,
}

impl EndScenarioHandler {
    /// Creates a new handler with the given dependencies.
    pub fn new(catalog: Arc<ContentCatalog>, sessions: Arc<dyn SessionRepository>) -> Self {
        Self { catalog, sessions }
    }

    /// Handles an end scenario command.
    pub async fn handle(
        &self,
        cmd: EndScenarioCommand,
    ) -> Result<EndScenarioResult, EndScenarioError> {
        let mut session = self
            .sessions
            .find(&cmd.session_id)
            .await
            .map_err(|e| EndScenarioError::Persistence(e.to_string()))?
            .ok_or(EndScenarioError::SessionNotFound(cmd.session_id))?;

        // Sessions can outlive catalog edits, so the title lookup is
        // best-effort.
        let scenario_title = self
            .catalog
            .scenario(session.scenario_id())
            .map(|(_, scenario)| scenario.title().to_string())
            .unwrap_or_else(|| "Training scenario".to_string());

        if session.end() {
            self.sessions
                .update(&session)
                .await
                .map_err(|e| EndScenarioError::Persistence(e.to_string()))?;
            info!(
                session_id = %cmd.session_id,
                messages = session.messages_exchanged(),
                "training session ended"
            );
        }

        Ok(EndScenarioResult {
            session_completed: true,
            summary: session_summary(&session, &scenario_title),
            messages_exchanged: session.messages_exchanged(),
            scenario_title,
        })
    }
}
