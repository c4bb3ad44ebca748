//! Training session aggregate entity.
//!
//! A session is one continuous multi-turn conversation between a user and
//! the AI-simulated partner, scoped to one scenario. The transcript is
//! append-only except for the terminal end transition.
//!
//! # Invariants
//!
//! - Transcript roles strictly alternate, starting with a `Partner` opening
//!   line at turn 0.
//! - Turn text is never empty.
//! - `Ended` is terminal; ending twice is idempotent and does not change
//!   the exchanged-message count.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DomainError, ErrorCode, ScenarioId, SessionId, Timestamp, UserId,
};

/// Who spoke a transcript turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnRole {
    /// The AI-simulated conversation partner.
    Partner,
    /// The training user.
    User,
}

/// One turn of the session transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub role: TurnRole,
    pub text: String,
    /// Zero-based position in the transcript.
    pub turn_index: u32,
}

/// Lifecycle state of a training session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Active,
    Ended,
}

/// Training session aggregate.
///
/// Deserialization goes through [`TrainingSessionRecord`] so a persisted
/// blob cannot reintroduce a transcript the mutation methods would have
/// rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TrainingSessionRecord")]
pub struct TrainingSession {
    id: SessionId,
    scenario_id: ScenarioId,
    user_id: UserId,
    user_name: String,
    partner_name: String,
    /// Persona system prompt built at start, resent on every provider call.
    persona_prompt: String,
    messages: Vec<TranscriptEntry>,
    state: SessionState,
    started_at: Timestamp,
    ended_at: Option<Timestamp>,
    completed: bool,
}

impl TrainingSession {
    /// Starts a new active session with the partner's opening line.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the opening line or a participant name is
    ///   empty.
    pub fn start(
        scenario_id: ScenarioId,
        user_id: UserId,
        user_name: impl Into<String>,
        partner_name: impl Into<String>,
        persona_prompt: impl Into<String>,
        opening_line: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let user_name = user_name.into();
        let partner_name = partner_name.into();
        let opening_line = opening_line.into();

        if user_name.trim().is_empty() {
            return Err(DomainError::validation("user_name", "Name cannot be empty"));
        }
        if partner_name.trim().is_empty() {
            return Err(DomainError::validation(
                "partner_name",
                "Name cannot be empty",
            ));
        }
        if opening_line.trim().is_empty() {
            return Err(DomainError::validation(
                "opening_line",
                "Opening line cannot be empty",
            ));
        }

        Ok(Self {
            id: SessionId::new(),
            scenario_id,
            user_id,
            user_name,
            partner_name,
            persona_prompt: persona_prompt.into(),
            messages: vec![TranscriptEntry {
                role: TurnRole::Partner,
                text: opening_line,
                turn_index: 0,
            }],
            state: SessionState::Active,
            started_at: Timestamp::now(),
            ended_at: None,
            completed: false,
        })
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn scenario_id(&self) -> ScenarioId {
        self.scenario_id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn partner_name(&self) -> &str {
        &self.partner_name
    }

    pub fn persona_prompt(&self) -> &str {
        &self.persona_prompt
    }

    pub fn messages(&self) -> &[TranscriptEntry] {
        &self.messages
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn started_at(&self) -> &Timestamp {
        &self.started_at
    }

    pub fn ended_at(&self) -> Option<&Timestamp> {
        self.ended_at.as_ref()
    }

    pub fn is_ended(&self) -> bool {
        self.state == SessionState::Ended
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Total turns exchanged so far.
    pub fn messages_exchanged(&self) -> usize {
        self.messages.len()
    }

    /// The partner's opening line. Always present by construction.
    pub fn opening_line(&self) -> &str {
        &self.messages[0].text
    }

    // ─────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────

    /// Appends a user turn.
    ///
    /// # Errors
    ///
    /// - `SessionEnded` if the session is already ended.
    /// - `ValidationFailed` if the text is blank.
    /// - `InvalidTurnOrder` if the last turn was also a user turn.
    pub fn push_user_turn(&mut self, text: impl Into<String>) -> Result<u32, DomainError> {
        self.push_turn(TurnRole::User, text.into())
    }

    /// Appends a partner turn.
    ///
    /// # Errors
    ///
    /// Same classes as [`Self::push_user_turn`], with the role reversed for
    /// the ordering check.
    pub fn push_partner_turn(&mut self, text: impl Into<String>) -> Result<u32, DomainError> {
        self.push_turn(TurnRole::Partner, text.into())
    }

    fn push_turn(&mut self, role: TurnRole, text: String) -> Result<u32, DomainError> {
        if self.is_ended() {
            return Err(DomainError::new(
                ErrorCode::SessionEnded,
                "Session has already ended",
            ));
        }
        if text.trim().is_empty() {
            return Err(DomainError::validation("text", "Turn text cannot be empty"));
        }
        // Strict alternation: the last turn must belong to the other role.
        if let Some(last) = self.messages.last() {
            if last.role == role {
                return Err(DomainError::new(
                    ErrorCode::InvalidTurnOrder,
                    "Two consecutive turns by the same role",
                )
                .with_detail("role", format!("{:?}", role)));
            }
        }

        let turn_index = self.messages.len() as u32;
        self.messages.push(TranscriptEntry {
            role,
            text,
            turn_index,
        });
        Ok(turn_index)
    }

    /// Ends the session. Idempotent: a second call leaves the end timestamp
    /// and the exchanged-message count untouched and reports `false`.
    pub fn end(&mut self) -> bool {
        if self.is_ended() {
            return false;
        }
        self.state = SessionState::Ended;
        self.ended_at = Some(Timestamp::now());
        self.completed = true;
        true
    }
}

/// Raw persisted form of a session, before invariant checks.
#[derive(Deserialize)]
struct TrainingSessionRecord {
    id: SessionId,
    scenario_id: ScenarioId,
    user_id: UserId,
    user_name: String,
    partner_name: String,
    persona_prompt: String,
    messages: Vec<TranscriptEntry>,
    state: SessionState,
    started_at: Timestamp,
    ended_at: Option<Timestamp>,
    completed: bool,
}

impl TryFrom<TrainingSessionRecord> for TrainingSession {
    type Error = DomainError;

    fn try_from(record: TrainingSessionRecord) -> Result<Self, Self::Error> {
        let first = record.messages.first().ok_or_else(|| {
            DomainError::validation("messages", "Transcript cannot be empty")
        })?;
        if first.role != TurnRole::Partner {
            return Err(DomainError::validation(
                "messages",
                "Transcript must open with a partner turn",
            ));
        }
        for (index, entry) in record.messages.iter().enumerate() {
            if entry.turn_index as usize != index {
                return Err(DomainError::validation(
                    "messages",
                    "Turn indices must be sequential from zero",
                ));
            }
            if entry.text.trim().is_empty() {
                return Err(DomainError::validation("messages", "Turn text cannot be empty"));
            }
        }
        if record
            .messages
            .windows(2)
            .any(|pair| pair[0].role == pair[1].role)
        {
            return Err(DomainError::new(
                ErrorCode::InvalidTurnOrder,
                "Two consecutive turns by the same role",
            ));
        }

        Ok(Self {
            id: record.id,
            scenario_id: record.scenario_id,
            user_id: record.user_id,
            user_name: record.user_name,
            partner_name: record.partner_name,
            persona_prompt: record.persona_prompt,
            messages: record.messages,
            state: record.state,
            started_at: record.started_at,
            ended_at: record.ended_at,
            completed: record.completed,
        })
    }
}
