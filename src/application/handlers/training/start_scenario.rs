//! StartScenario command handler.
//!
//! Opens a training session: validates the scenario, builds the persona
//! prompt, asks the provider for the partner's opening line, and persists
//! the new session. The returned `partner_message` is non-empty in all
//! cases, including provider outage, because the caller's conversation UI
//! blocks on it.

use std::sync::Arc;

use thiserror::Error;
use tracing::warn;

use crate::domain::catalog::ContentCatalog;
use crate::domain::foundation::{DomainError, ScenarioId, SessionId, UserId};
use crate::domain::session::{PersonaPromptTemplate, TrainingSession};
use crate::ports::{AiProvider, CompletionRequest, SessionRepository};

/// Command to start a training scenario.
#[derive(Debug, Clone)]
pub struct StartScenarioCommand {
    pub scenario_id: ScenarioId,
    pub user_id: UserId,
    /// Name the user wants to be addressed by.
    pub user_name: String,
    /// Name given to the simulated partner.
    pub partner_name: String,
}

/// Errors that can occur when starting a scenario.
#[derive(Debug, Clone, Error)]
pub enum StartScenarioError {
    /// No scenario with this id exists in the catalog.
    #[error("Scenario not found: {0}")]
    ScenarioNotFound(ScenarioId),

    /// The scenario exists but is a worked example, not a dialogue seed.
    #[error("Scenario {0} is a worked example and cannot seed a live session")]
    ScenarioNotTrainable(ScenarioId),

    /// A required field is missing or blank.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The session could not be persisted.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

/// Result of starting a scenario.
#[derive(Debug, Clone)]
pub struct StartScenarioResult {
    pub session_id: SessionId,
    pub scenario_title: String,
    pub scenario_context: String,
    pub learning_goals: Vec<String>,
    /// The partner's opening line. Never empty.
    pub partner_message: String,
    pub partner_name: String,
}

/// Handler for StartScenario commands.
pub struct StartScenarioHandler {
    catalog: Arc<ContentCatalog>,
    sessions: Arc<dyn SessionRepository>,
    ai_provider: Arc<dyn AiProvider>,
    template: PersonaPromptTemplate,
    fallback_line: String,
}

impl StartScenarioHandler {
    /// Creates a new handler with the given dependencies.
    pub fn new(
        catalog: Arc<ContentCatalog>,
        sessions: Arc<dyn SessionRepository>,
        ai_provider: Arc<dyn AiProvider>,
        template: PersonaPromptTemplate,
        fallback_line: impl Into<String>,
    ) -> Self {
        Self {
            catalog,
            sessions,
            ai_provider,
            template,
            fallback_line: fallback_line.into(),
        }
    }

    /// Handles a start scenario command.
    pub async fn handle(
        &self,
        cmd: StartScenarioCommand,
    ) -> Result<StartScenarioResult, StartScenarioError> {
        // Name validation happens before the provider round-trip; a blank
        // request must not spend an AI call.
        if cmd.user_name.trim().is_empty() {
            return Err(StartScenarioError::Validation(
                "user_name cannot be empty".to_string(),
            ));
        }
        if cmd.partner_name.trim().is_empty() {
            return Err(StartScenarioError::Validation(
                "partner_name cannot be empty".to_string(),
            ));
        }

        let (_, scenario) = self
            .catalog
            .scenario(cmd.scenario_id)
            .ok_or(StartScenarioError::ScenarioNotFound(cmd.scenario_id))?;

        let dialogue = scenario
            .as_dialogue()
            .ok_or(StartScenarioError::ScenarioNotTrainable(cmd.scenario_id))?;

        let persona_prompt = self
            .template
            .render(dialogue, cmd.user_name.trim(), cmd.partner_name.trim());

        // Opening line: empty history, persona prompt only. Provider failure
        // degrades to the fixed fallback line; the session must start either way.
        let request = CompletionRequest::new().with_system_prompt(&persona_prompt);
        let partner_message = match self.ai_provider.complete(request).await {
            Ok(response) if !response.content.trim().is_empty() => response.content,
            Ok(_) => {
                warn!(scenario_id = %cmd.scenario_id, "provider returned empty opening line, using fallback");
                self.fallback_line.clone()
            }
            Err(err) => {
                warn!(scenario_id = %cmd.scenario_id, error = %err, "opening line generation failed, using fallback");
                self.fallback_line.clone()
            }
        };

        let session = TrainingSession::start(
            cmd.scenario_id,
            cmd.user_id,
            cmd.user_name,
            cmd.partner_name,
            persona_prompt,
            partner_message.clone(),
        )
        .map_err(|e: DomainError| StartScenarioError::Validation(e.to_string()))?;

        self.sessions
            .save(&session)
            .await
            .map_err(|e| StartScenarioError::Persistence(e.to_string()))?;

        Ok(StartScenarioResult {
            session_id: *session.id(),
            scenario_title: dialogue.title.clone(),
            scenario_context: dialogue.context.clone(),
            learning_goals: dialogue.learning_goals.clone(),
            partner_message,
            partner_name: session.partner_name().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAiProvider, MockError};
    use crate::adapters::memory::InMemorySessionStore;
    use crate::config::DEFAULT_FALLBACK_LINE;

    fn handler(provider: MockAiProvider) -> StartScenarioHandler {
        StartScenarioHandler::new(
            Arc::new(ContentCatalog::seed()),
            Arc::new(InMemorySessionStore::new()),
            Arc::new(provider),
            PersonaPromptTemplate::default(),
            DEFAULT_FALLBACK_LINE,
        )
    }

    fn command(scenario_id: u32) -> StartScenarioCommand {
        StartScenarioCommand {
            scenario_id: ScenarioId::new(scenario_id),
            user_id: UserId::new("user-1").unwrap(),
            user_name: "Sophia".to_string(),
            partner_name: "Max".to_string(),
        }
    }

    #[tokio::test]
    async fn start_returns_non_empty_partner_message() {
        let provider = MockAiProvider::new().with_response("Hey... today was rough.");
        let result = handler(provider).handle(command(1)).await.unwrap();

        assert!(!result.partner_message.is_empty());
        assert_eq!(result.partner_message, "Hey... today was rough.");
        assert_eq!(result.partner_name, "Max");
        assert!(!result.scenario_title.is_empty());
    }

    #[tokio::test]
    async fn provider_failure_degrades_to_fallback_line() {
        let provider = MockAiProvider::new().with_error(MockError::Timeout { timeout_secs: 25 });
        let result = handler(provider).handle(command(1)).await.unwrap();

        assert_eq!(result.partner_message, DEFAULT_FALLBACK_LINE);
        assert!(!result.partner_message.is_empty());
    }

    #[tokio::test]
    async fn empty_provider_reply_degrades_to_fallback_line() {
        let provider = MockAiProvider::new().with_response("   ");
        let result = handler(provider).handle(command(1)).await.unwrap();

        assert_eq!(result.partner_message, DEFAULT_FALLBACK_LINE);
    }

    #[tokio::test]
    async fn blank_names_are_rejected_before_any_provider_call() {
        let provider = MockAiProvider::new().with_response("Hey.");
        let handler = StartScenarioHandler::new(
            Arc::new(ContentCatalog::seed()),
            Arc::new(InMemorySessionStore::new()),
            Arc::new(provider.clone()),
            PersonaPromptTemplate::default(),
            DEFAULT_FALLBACK_LINE,
        );

        let mut cmd = command(1);
        cmd.user_name = "   ".to_string();
        let err = handler.handle(cmd).await.unwrap_err();
        assert!(matches!(err, StartScenarioError::Validation(_)));

        let mut cmd = command(1);
        cmd.partner_name = String::new();
        let err = handler.handle(cmd).await.unwrap_err();
        assert!(matches!(err, StartScenarioError::Validation(_)));

        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn unknown_scenario_fails_not_found() {
        let provider = MockAiProvider::new();
        let err = handler(provider).handle(command(999)).await.unwrap_err();
        assert!(matches!(err, StartScenarioError::ScenarioNotFound(_)));
    }

    #[tokio::test]
    async fn worked_example_scenario_is_not_trainable() {
        // Scenario 2 in the seed catalog is a worked example.
        let provider = MockAiProvider::new();
        let err = handler(provider).handle(command(2)).await.unwrap_err();
        assert!(matches!(err, StartScenarioError::ScenarioNotTrainable(_)));
    }

    #[tokio::test]
    async fn started_session_is_persisted_with_opening_turn() {
        let store = Arc::new(InMemorySessionStore::new());
        let handler = StartScenarioHandler::new(
            Arc::new(ContentCatalog::seed()),
            store.clone(),
            Arc::new(MockAiProvider::new().with_response("Hey.")),
            PersonaPromptTemplate::default(),
            DEFAULT_FALLBACK_LINE,
        );

        let result = handler.handle(command(1)).await.unwrap();
        let session = store.find(&result.session_id).await.unwrap().unwrap();
        assert_eq!(session.messages_exchanged(), 1);
        assert_eq!(session.opening_line(), "Hey.");
    }

    #[tokio::test]
    async fn persona_prompt_reaches_the_provider() {
        let provider = MockAiProvider::new().with_response("Hey.");
        let handler = StartScenarioHandler::new(
            Arc::new(ContentCatalog::seed()),
            Arc::new(InMemorySessionStore::new()),
            Arc::new(provider.clone()),
            PersonaPromptTemplate::default(),
            DEFAULT_FALLBACK_LINE,
        );

        handler.handle(command(1)).await.unwrap();

        let calls = provider.calls();
        assert_eq!(calls.len(), 1);
        let prompt = calls[0].system_prompt.as_deref().unwrap();
        assert!(prompt.contains("Max"));
        assert!(prompt.contains("Sophia"));
        assert!(calls[0].messages.is_empty());
    }
}
