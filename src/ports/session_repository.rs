//! Session persistence port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, SessionId};
use crate::domain::session::{TrainingSession, TranscriptEntry};

/// Port for training session persistence.
///
/// Sessions are single-writer by design, but the store may still see
/// concurrent writers; transcript appends therefore go through
/// [`SessionRepository::append_exchange`], an optimistic compare-and-append
/// keyed on the current message count, so a lost race can never corrupt or
/// duplicate turns.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Persists a newly started session.
    async fn save(&self, session: &TrainingSession) -> Result<(), DomainError>;

    /// Finds a session by id.
    async fn find(&self, id: &SessionId) -> Result<Option<TrainingSession>, DomainError>;

    /// Appends one user/partner exchange atomically.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the session does not exist.
    /// - `ConcurrentModification` if the stored transcript no longer has
    ///   `expected_len` messages.
    async fn append_exchange(
        &self,
        id: &SessionId,
        expected_len: usize,
        user_turn: TranscriptEntry,
        partner_turn: TranscriptEntry,
    ) -> Result<(), DomainError>;

    /// Persists the terminal end transition of a session.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the session does not exist.
    async fn update(&self, session: &TrainingSession) -> Result<(), DomainError>;
}
