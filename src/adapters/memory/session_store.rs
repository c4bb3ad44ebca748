//! In-memory session store.
//!
//! Backing store for tests and single-process deployments. The
//! compare-and-append check runs under the write lock, so concurrent
//! responders cannot interleave duplicate turns.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, SessionId};
use crate::domain::session::{SessionState, TrainingSession, TranscriptEntry};
use crate::ports::SessionRepository;

/// In-memory implementation of [`SessionRepository`].
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionId, TrainingSession>>,
}

impl InMemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions.
    pub fn len(&self) -> usize {
        self.sessions.read().unwrap().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn not_found(id: &SessionId) -> DomainError {
        DomainError::new(ErrorCode::SessionNotFound, "Session not found")
            .with_detail("session_id", id.to_string())
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionStore {
    async fn save(&self, session: &TrainingSession) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().unwrap();
        sessions.insert(*session.id(), session.clone());
        Ok(())
    }

    async fn find(&self, id: &SessionId) -> Result<Option<TrainingSession>, DomainError> {
        let sessions = self.sessions.read().unwrap();
        Ok(sessions.get(id).cloned())
    }

    async fn append_exchange(
        &self,
        id: &SessionId,
        expected_len: usize,
        user_turn: TranscriptEntry,
        partner_turn: TranscriptEntry,
    ) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().unwrap();
        let session = sessions.get_mut(id).ok_or_else(|| Self::not_found(id))?;

        if session.messages().len() != expected_len {
            return Err(DomainError::new(
                ErrorCode::ConcurrentModification,
                "Transcript changed since it was read",
            )
            .with_detail("expected_len", expected_len.to_string())
            .with_detail("actual_len", session.messages().len().to_string()));
        }

        session.push_user_turn(user_turn.text)?;
        session.push_partner_turn(partner_turn.text)?;
        Ok(())
    }

    async fn update(&self, session: &TrainingSession) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().unwrap();
        if !sessions.contains_key(session.id()) {
            return Err(Self::not_found(session.id()));
        }
        sessions.insert(*session.id(), session.clone());
        Ok(())
    }
}

/// Convenience for tests: whether a stored session has ended.
impl InMemorySessionStore {
    pub fn state_of(&self, id: &SessionId) -> Option<SessionState> {
        self.sessions.read().unwrap().get(id).map(|s| s.state())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ScenarioId, UserId};
    use crate::domain::session::TurnRole;

    fn session() -> TrainingSession {
        TrainingSession::start(
            ScenarioId::new(1),
            UserId::new("user-1").unwrap(),
            "Sophia",
            "Max",
            "prompt",
            "Hey.",
        )
        .unwrap()
    }

    fn entry(role: TurnRole, text: &str, idx: u32) -> TranscriptEntry {
        TranscriptEntry {
            role,
            text: text.to_string(),
            turn_index: idx,
        }
    }

    #[tokio::test]
    async fn save_and_find_roundtrip() {
        let store = InMemorySessionStore::new();
        let session = session();
        store.save(&session).await.unwrap();

        let found = store.find(session.id()).await.unwrap().unwrap();
        assert_eq!(found, session);
    }

    #[tokio::test]
    async fn find_unknown_returns_none() {
        let store = InMemorySessionStore::new();
        assert!(store.find(&SessionId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn append_exchange_adds_both_turns() {
        let store = InMemorySessionStore::new();
        let session = session();
        store.save(&session).await.unwrap();

        store
            .append_exchange(
                session.id(),
                1,
                entry(TurnRole::User, "That sounds hard.", 1),
                entry(TurnRole::Partner, "It was.", 2),
            )
            .await
            .unwrap();

        let found = store.find(session.id()).await.unwrap().unwrap();
        assert_eq!(found.messages_exchanged(), 3);
    }

    #[tokio::test]
    async fn append_exchange_detects_stale_length() {
        let store = InMemorySessionStore::new();
        let session = session();
        store.save(&session).await.unwrap();

        let err = store
            .append_exchange(
                session.id(),
                5,
                entry(TurnRole::User, "hi", 1),
                entry(TurnRole::Partner, "hey", 2),
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ConcurrentModification);

        // Transcript untouched after the failed append.
        let found = store.find(session.id()).await.unwrap().unwrap();
        assert_eq!(found.messages_exchanged(), 1);
    }

    #[tokio::test]
    async fn append_exchange_on_unknown_session_fails() {
        let store = InMemorySessionStore::new();
        let err = store
            .append_exchange(
                &SessionId::new(),
                0,
                entry(TurnRole::User, "hi", 1),
                entry(TurnRole::Partner, "hey", 2),
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::SessionNotFound);
    }

    #[tokio::test]
    async fn update_unknown_session_fails() {
        let store = InMemorySessionStore::new();
        let err = store.update(&session()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::SessionNotFound);
    }
}
