//! GetSession query handler.
//!
//! Read-only transcript retrieval, used by clients that reload a running
//! conversation.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::foundation::{ScenarioId, SessionId};
use crate::domain::session::{SessionState, TranscriptEntry};
use crate::ports::SessionRepository;

/// Query for one training session.
#[derive(Debug, Clone)]
pub struct GetSessionQuery {
    pub session_id: SessionId,
}

/// Errors that can occur when fetching a session.
#[derive(Debug, Clone, Error)]
pub enum GetSessionError {
    /// No session with this id exists.
    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    /// The session could not be read from the store.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

/// Read model of a training session.
#[derive(Debug, Clone)]
pub struct SessionView {
    pub session_id: SessionId,
    pub scenario_id: ScenarioId,
    pub user_name: String,
    pub partner_name: String,
    pub state: SessionState,
    pub messages: Vec<TranscriptEntry>,
}

/// Handler for GetSession queries.
pub struct GetSessionHandler {
    sessions: Arc<dyn SessionRepository>,
}

impl GetSessionHandler {
    /// Creates a new handler with the given dependencies.
    pub fn new(sessions: Arc<dyn SessionRepository>) -> Self {
        Self { sessions }
    }

    /// Handles a get session query.
    pub async fn handle(&self, query: GetSessionQuery) -> Result<SessionView, GetSessionError> {
        let session = self
            .sessions
            .find(&query.session_id)
            .await
            .map_err(|e| GetSessionError::Persistence(e.to_string()))?
            .ok_or(GetSessionError::SessionNotFound(query.session_id))?;

        Ok(SessionView {
            session_id: *session.id(),
            scenario_id: session.scenario_id(),
            user_name: session.user_name().to_string(),
            partner_name: session.partner_name().to_string(),
            state: session.state(),
            messages: session.messages().to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemorySessionStore;
    use crate::domain::foundation::UserId;
    use crate::domain::session::{TrainingSession, TurnRole};

    #[tokio::test]
    async fn returns_full_transcript_in_order() {
        let store = Arc::new(InMemorySessionStore::new());
        let mut session = TrainingSession::start(
            ScenarioId::new(1),
            UserId::new("user-1").unwrap(),
            "Sophia",
            "Max",
            "prompt",
            "Hey.",
        )
        .unwrap();
        session.push_user_turn("Hi, what happened?").unwrap();
        session.push_partner_turn("Work again.").unwrap();
        let id = *session.id();
        store.save(&session).await.unwrap();

        let view = GetSessionHandler::new(store)
            .handle(GetSessionQuery { session_id: id })
            .await
            .unwrap();

        assert_eq!(view.session_id, id);
        assert_eq!(view.partner_name, "Max");
        assert_eq!(view.state, SessionState::Active);
        assert_eq!(view.messages.len(), 3);
        assert_eq!(view.messages[0].role, TurnRole::Partner);
        assert_eq!(view.messages[2].text, "Work again.");
    }

    #[tokio::test]
    async fn unknown_session_fails_not_found() {
        let handler = GetSessionHandler::new(Arc::new(InMemorySessionStore::new()));
        let err = handler
            .handle(GetSessionQuery {
                session_id: SessionId::new(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, GetSessionError::SessionNotFound(_)));
    }
}
