//! HTTP DTOs for training endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing
//! independent evolution.

use serde::{Deserialize, Serialize};

use crate::application::handlers::training::{
    EndScenarioResult, RespondResult, SessionView, StartScenarioResult,
};
use crate::domain::evaluation::EvaluationResult;
use crate::domain::session::{SessionState, TurnRole};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to start a training scenario.
#[derive(Debug, Clone, Deserialize)]
pub struct StartTrainingRequest {
    pub scenario_id: u32,
    pub user_id: String,
    pub user_name: String,
    pub partner_name: String,
}

/// Request to respond within a session.
#[derive(Debug, Clone, Deserialize)]
pub struct RespondRequest {
    pub session_id: String,
    pub user_response: String,
}

/// Request to end a session.
#[derive(Debug, Clone, Deserialize)]
pub struct EndTrainingRequest {
    pub session_id: String,
}

/// Request to evaluate a candidate response.
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluateRequest {
    pub scenario_id: u32,
    pub user_id: String,
    pub user_response: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Response for a started training session.
#[derive(Debug, Clone, Serialize)]
pub struct StartTrainingResponse {
    pub session_id: String,
    pub scenario_title: String,
    pub scenario_context: String,
    pub learning_goals: Vec<String>,
    pub partner_message: String,
    pub partner_name: String,
}

impl From<StartScenarioResult> for StartTrainingResponse {
    fn from(result: StartScenarioResult) -> Self {
        Self {
            session_id: result.session_id.to_string(),
            scenario_title: result.scenario_title,
            scenario_context: result.scenario_context,
            learning_goals: result.learning_goals,
            partner_message: result.partner_message,
            partner_name: result.partner_name,
        }
    }
}

/// Response for one exchange.
#[derive(Debug, Clone, Serialize)]
pub struct RespondResponse {
    pub partner_response: String,
    pub session_continues: bool,
}

impl From<RespondResult> for RespondResponse {
    fn from(result: RespondResult) -> Self {
        Self {
            partner_response: result.partner_response,
            session_continues: result.session_continues,
        }
    }
}

/// Response for an ended session.
#[derive(Debug, Clone, Serialize)]
pub struct EndTrainingResponse {
    pub session_completed: bool,
    pub summary: String,
    pub messages_exchanged: usize,
    pub scenario_title: String,
}

impl From<EndScenarioResult> for EndTrainingResponse {
    fn from(result: EndScenarioResult) -> Self {
        Self {
            session_completed: result.session_completed,
            summary: result.summary,
            messages_exchanged: result.messages_exchanged,
            scenario_title: result.scenario_title,
        }
    }
}

/// One transcript turn.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptEntryResponse {
    pub role: TurnRole,
    pub text: String,
    pub turn_index: u32,
}

/// Detailed session view for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub scenario_id: u32,
    pub user_name: String,
    pub partner_name: String,
    pub state: SessionState,
    pub messages: Vec<TranscriptEntryResponse>,
}

impl From<SessionView> for SessionResponse {
    fn from(view: SessionView) -> Self {
        Self {
            session_id: view.session_id.to_string(),
            scenario_id: view.scenario_id.as_u32(),
            user_name: view.user_name,
            partner_name: view.partner_name,
            state: view.state,
            messages: view
                .messages
                .into_iter()
                .map(|m| TranscriptEntryResponse {
                    role: m.role,
                    text: m.text,
                    turn_index: m.turn_index,
                })
                .collect(),
        }
    }
}

/// Structured evaluation feedback.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationResponse {
    pub empathy_score: f32,
    pub feedback: String,
    pub improvements: Vec<String>,
    pub alternative_responses: Vec<String>,
    pub emotional_awareness: String,
    pub next_level_tip: String,
}

impl From<EvaluationResult> for EvaluationResponse {
    fn from(result: EvaluationResult) -> Self {
        Self {
            empathy_score: result.empathy_score.value(),
            feedback: result.feedback,
            improvements: result.improvements,
            alternative_responses: result.alternative_responses,
            emotional_awareness: result.emotional_awareness,
            next_level_tip: result.next_level_tip,
        }
    }
}
