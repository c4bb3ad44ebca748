//! Persona prompt and session summary templates.
//!
//! Templates are injected through configuration so the engine is testable
//! with arbitrary wording. Placeholders use `{name}` syntax and are replaced
//! verbatim; unknown placeholders are left untouched.

use crate::domain::catalog::AiDialogue;
use crate::domain::session::TrainingSession;

/// Template for the persona system prompt sent with every provider call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonaPromptTemplate {
    template: String,
}

/// Default persona prompt wording.
pub const DEFAULT_PERSONA_TEMPLATE: &str = "\
You are {partner_name}, the romantic partner of {user_name}, in a guided \
empathy training conversation.

Situation: {context}

{user_name} is practicing these skills:
{learning_goals}

Stay in character as {partner_name}. Speak naturally and emotionally, in one \
to three sentences per reply. React to how empathetic {user_name}'s responses \
feel: open up when you feel heard, withdraw a little when you feel dismissed. \
Never break character, never mention that this is an exercise.";

impl PersonaPromptTemplate {
    /// Creates a template from explicit wording.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Renders the persona prompt for one scenario and participant pair.
    pub fn render(&self, scenario: &AiDialogue, user_name: &str, partner_name: &str) -> String {
        let goals = scenario
            .learning_goals
            .iter()
            .map(|g| format!("- {}", g))
            .collect::<Vec<_>>()
            .join("\n");

        self.template
            .replace("{partner_name}", partner_name)
            .replace("{user_name}", user_name)
            .replace("{context}", &scenario.context)
            .replace("{learning_goals}", &goals)
    }
}

impl Default for PersonaPromptTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_PERSONA_TEMPLATE)
    }
}

/// Deterministic end-of-session summary.
///
/// The summary is template-based rather than AI-generated so that ending a
/// session never depends on provider availability.
pub fn session_summary(session: &TrainingSession, scenario_title: &str) -> String {
    let user_turns = session
        .messages()
        .iter()
        .filter(|m| m.role == super::TurnRole::User)
        .count();
    format!(
        "You completed \"{}\" with {} and exchanged {} messages ({} of your own). \
         Review the conversation and notice where {} opened up after you \
         acknowledged a feeling.",
        scenario_title,
        session.partner_name(),
        session.messages_exchanged(),
        user_turns,
        session.partner_name(),
    )
}
