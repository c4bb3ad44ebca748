//! Respond command handler.
//!
//! Appends a user turn, asks the provider for the partner's reply with the
//! full transcript as context, and persists both turns as one atomic
//! exchange.

use std::sync::Arc;

use thiserror::Error;
use tracing::warn;

use crate::domain::foundation::{DomainError, ErrorCode, SessionId};
use crate::domain::session::{TrainingSession, TurnRole};
use crate::ports::{AiProvider, CompletionRequest, Message, SessionRepository};

/// Command to respond within a training session.
#[derive(Debug, Clone)]
pub struct RespondCommand {
    pub session_id: SessionId,
    pub user_response: String,
}

/// Errors that can occur when responding.
#[derive(Debug, Clone, Error)]
pub enum RespondError {
    /// No session with this id exists.
    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    /// The session has already ended and accepts no further turns.
    #[error("Session has already ended")]
    SessionEnded,

    /// The response text is empty or whitespace only.
    #[error("Validation error: user response cannot be empty")]
    EmptyResponse,

    /// Another writer changed the transcript between read and append.
    #[error("Transcript changed concurrently, retry the request")]
    Conflict,

    /// The exchange could not be persisted. The turn was not acknowledged.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Domain invariant violation.
    #[error("Domain error: {0}")]
    Domain(String),
}

impl From<DomainError> for RespondError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::SessionEnded => RespondError::SessionEnded,
            ErrorCode::ConcurrentModification => RespondError::Conflict,
            ErrorCode::PersistenceFailed => RespondError::Persistence(err.to_string()),
            _ => RespondError::Domain(err.to_string()),
        }
    }
}

/// Result of responding in a session.
#[derive(Debug, Clone)]
pub struct RespondResult {
    /// The partner's reply. Never empty.
    pub partner_response: String,
    /// Whether the session accepts further turns. Currently always true:
    /// no turn limit is enforced pending a product decision.
    pub session_continues: bool,
}

/// Handler for Respond commands.
pub struct RespondHandler {
    sessions: Arc<dyn SessionRepository>,
    ai_provider: Arc<dyn AiProvider>,
    fallback_line: String,
}

impl RespondHandler {
    /// Creates a new handler with the given dependencies.
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        ai_provider: Arc<dyn AiProvider>,
        fallback_line: impl Into<String>,
    ) -> Self {
        Self {
            sessions,
            ai_provider,
            fallback_line: fallback_line.into(),
        }
    }

    /// Handles a respond command.
    pub async fn handle(&self, cmd: RespondCommand) -> Result<RespondResult, RespondError> {
        let content = cmd.user_response.trim();
        if content.is_empty() {
            return Err(RespondError::EmptyResponse);
        }

        let mut session = self
            .sessions
            .find(&cmd.session_id)
            .await
            .map_err(|e| RespondError::Persistence(e.to_string()))?
            .ok_or(RespondError::SessionNotFound(cmd.session_id))?;

        if session.is_ended() {
            return Err(RespondError::SessionEnded);
        }

        // Apply both turns to a local copy first; the aggregate enforces
        // alternation and the store re-checks length on append.
        let expected_len = session.messages_exchanged();
        session.push_user_turn(content)?;

        let request = Self::build_request(&session);
        let partner_response = match self.ai_provider.complete(request).await {
            Ok(response) if !response.content.trim().is_empty() => response.content,
            Ok(_) => {
                warn!(session_id = %cmd.session_id, "provider returned empty reply, using fallback");
                self.fallback_line.clone()
            }
            Err(err) => {
                warn!(session_id = %cmd.session_id, error = %err, "reply generation failed, using fallback");
                self.fallback_line.clone()
            }
        };
        session.push_partner_turn(&partner_response)?;

        let len = session.messages().len();
        let user_turn = session.messages()[len - 2].clone();
        let partner_turn = session.messages()[len - 1].clone();

        self.sessions
            .append_exchange(&cmd.session_id, expected_len, user_turn, partner_turn)
            .await?;

        Ok(RespondResult {
            partner_response,
            session_continues: true,
        })
    }

    /// Maps the transcript to provider messages: the simulated partner is
    /// the assistant, the training user is the user.
    fn build_request(session: &TrainingSession) -> CompletionRequest {
        let mut request = CompletionRequest::new().with_system_prompt(session.persona_prompt());
        for entry in session.messages() {
            request.messages.push(match entry.role {
                TurnRole::Partner => Message::assistant(&entry.text),
                TurnRole::User => Message::user(&entry.text),
            });
        }
        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAiProvider, MockError};
    use crate::adapters::memory::InMemorySessionStore;
    use crate::config::DEFAULT_FALLBACK_LINE;
    use crate::domain::foundation::{ScenarioId, UserId};

    async fn store_with_session() -> (Arc<InMemorySessionStore>, SessionId) {
        let store = Arc::new(InMemorySessionStore::new());
        let session = TrainingSession::start(
            ScenarioId::new(1),
            UserId::new("user-1").unwrap(),
            "Sophia",
            "Max",
            "You are Max.",
            "Hey... today was rough.",
        )
        .unwrap();
        let id = *session.id();
        store.save(&session).await.unwrap();
        (store, id)
    }

    fn handler(store: Arc<InMemorySessionStore>, provider: MockAiProvider) -> RespondHandler {
        RespondHandler::new(store, Arc::new(provider), DEFAULT_FALLBACK_LINE)
    }

    #[tokio::test]
    async fn respond_returns_partner_reply_and_continues() {
        let (store, id) = store_with_session().await;
        let provider = MockAiProvider::new().with_response("It really was. Thanks for asking.");

        let result = handler(Arc::clone(&store), provider)
            .handle(RespondCommand {
                session_id: id,
                user_response: "That sounds exhausting, tell me about it?".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(result.partner_response, "It really was. Thanks for asking.");
        assert!(result.session_continues);

        let session = store.find(&id).await.unwrap().unwrap();
        assert_eq!(session.messages_exchanged(), 3);
    }

    #[tokio::test]
    async fn unknown_session_fails_not_found_and_creates_nothing() {
        let store = Arc::new(InMemorySessionStore::new());
        let err = handler(Arc::clone(&store), MockAiProvider::new())
            .handle(RespondCommand {
                session_id: SessionId::new(),
                user_response: "hello?".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, RespondError::SessionNotFound(_)));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn empty_response_is_rejected_before_any_io() {
        let (store, id) = store_with_session().await;
        let provider = MockAiProvider::new();

        let err = handler(store, provider.clone())
            .handle(RespondCommand {
                session_id: id,
                user_response: "   ".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, RespondError::EmptyResponse));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn ended_session_rejects_respond() {
        let (store, id) = store_with_session().await;
        let mut session = store.find(&id).await.unwrap().unwrap();
        session.end();
        store.update(&session).await.unwrap();

        let err = handler(store, MockAiProvider::new())
            .handle(RespondCommand {
                session_id: id,
                user_response: "still there?".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, RespondError::SessionEnded));
    }

    #[tokio::test]
    async fn provider_failure_degrades_to_fallback_and_still_persists() {
        let (store, id) = store_with_session().await;
        let provider = MockAiProvider::new().with_error(MockError::Unavailable {
            message: "outage".to_string(),
        });

        let result = handler(Arc::clone(&store), provider)
            .handle(RespondCommand {
                session_id: id,
                user_response: "That sounds hard.".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(result.partner_response, DEFAULT_FALLBACK_LINE);
        let session = store.find(&id).await.unwrap().unwrap();
        assert_eq!(session.messages_exchanged(), 3);
    }

    #[tokio::test]
    async fn full_history_is_sent_to_the_provider() {
        let (store, id) = store_with_session().await;
        let provider = MockAiProvider::new().with_response("reply");

        handler(store, provider.clone())
            .handle(RespondCommand {
                session_id: id,
                user_response: "I'm here.".to_string(),
            })
            .await
            .unwrap();

        let calls = provider.calls();
        assert_eq!(calls.len(), 1);
        // Opening partner line plus the new user turn.
        assert_eq!(calls[0].messages.len(), 2);
        assert_eq!(calls[0].messages[1].content, "I'm here.");
        assert!(calls[0].system_prompt.as_deref().unwrap().contains("Max"));
    }

    #[tokio::test]
    async fn transcript_alternates_after_multiple_exchanges() {
        let (store, id) = store_with_session().await;
        let provider = MockAiProvider::new();
        let handler = handler(Arc::clone(&store), provider);

        for text in ["First reply.", "Second reply.", "Third reply."] {
            handler
                .handle(RespondCommand {
                    session_id: id,
                    user_response: text.to_string(),
                })
                .await
                .unwrap();
        }

        let session = store.find(&id).await.unwrap().unwrap();
        assert_eq!(session.messages_exchanged(), 7);
        for pair in session.messages().windows(2) {
            assert_ne!(pair[0].role, pair[1].role);
        }
        assert_eq!(session.messages()[0].role, TurnRole::Partner);
    }
}
