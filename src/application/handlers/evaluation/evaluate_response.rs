//! EvaluateResponse command handler.
//!
//! Grades one candidate response against the empathy rubric. Unlike the
//! conversational flow there is no fallback here: a fabricated score would
//! mislead the user, so provider and parse failures surface as
//! `EvaluationFailed`.

use std::sync::Arc;

use thiserror::Error;
use tracing::warn;

use crate::domain::catalog::ContentCatalog;
use crate::domain::evaluation::{parse_evaluation, rubric_prompt, EvaluationResult};
use crate::domain::foundation::{ScenarioId, Timestamp, UserId};
use crate::ports::{AiProvider, CompletionRequest, EvaluationLog, EvaluationRecord, MessageRole};

/// Rubric grading wants stable output, so the temperature stays low.
const EVALUATION_TEMPERATURE: f32 = 0.2;

/// Command to evaluate a candidate response.
#[derive(Debug, Clone)]
pub struct EvaluateResponseCommand {
    pub scenario_id: ScenarioId,
    pub user_id: UserId,
    /// The response to grade.
    pub user_response: String,
}

/// Errors that can occur when evaluating a response.
#[derive(Debug, Clone, Error)]
pub enum EvaluateResponseError {
    /// No scenario with this id exists in the catalog.
    #[error("Scenario not found: {0}")]
    ScenarioNotFound(ScenarioId),

    /// The response text is empty or whitespace only.
    #[error("Validation error: response cannot be empty")]
    EmptyResponse,

    /// The evaluator could not produce a usable grading.
    #[error("Evaluation failed: {0}")]
    EvaluationFailed(String),
}

/// Handler for EvaluateResponse commands.
pub struct EvaluateResponseHandler {
    catalog: Arc<ContentCatalog>,
    ai_provider: Arc<dyn AiProvider>,
    evaluation_log: Arc<dyn EvaluationLog>,
}

impl EvaluateResponseHandler {
    /// Creates a new handler with the given dependencies.
    pub fn new(
        catalog: Arc<ContentCatalog>,
        ai_provider: Arc<dyn AiProvider>,
        evaluation_log: Arc<dyn EvaluationLog>,
    ) -> Self {
        Self {
            catalog,
            ai_provider,
            evaluation_log,
        }
    }

    /// Handles an evaluate response command.
    pub async fn handle(
        &self,
        cmd: EvaluateResponseCommand,
    ) -> Result<EvaluationResult, EvaluateResponseError> {
        let response = cmd.user_response.trim();
        if response.is_empty() {
            return Err(EvaluateResponseError::EmptyResponse);
        }

        let (_, scenario) = self
            .catalog
            .scenario(cmd.scenario_id)
            .ok_or(EvaluateResponseError::ScenarioNotFound(cmd.scenario_id))?;

        let prompt = rubric_prompt(scenario, response);
        let request = CompletionRequest::new()
            .with_message(MessageRole::User, prompt)
            .with_temperature(EVALUATION_TEMPERATURE);

        let completion = self
            .ai_provider
            .complete(request)
            .await
            .map_err(|e| EvaluateResponseError::EvaluationFailed(e.to_string()))?;

        let result = parse_evaluation(&completion.content)
            .map_err(|e| EvaluateResponseError::EvaluationFailed(e.to_string()))?;

        // The audit trail is best-effort; the grading already succeeded.
        let record = EvaluationRecord {
            user_id: cmd.user_id,
            scenario_id: cmd.scenario_id,
            user_response: response.to_string(),
            result: result.clone(),
            recorded_at: Timestamp::now(),
        };
        if let Err(err) = self.evaluation_log.record(record).await {
            warn!(scenario_id = %cmd.scenario_id, error = %err, "failed to record evaluation");
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAiProvider, MockError};
    use crate::adapters::memory::InMemoryEvaluationLog;

    const GRADING: &str = r#"{
        "empathy_score": 7.5,
        "feedback": "You acknowledged the feeling well.",
        "improvements": ["Ask a follow-up question"],
        "alternative_responses": ["That sounds like a lot to carry."],
        "emotional_awareness": "You noticed the exhaustion behind the words.",
        "next_level_tip": "Try reflecting the feeling before anything else."
    }"#;

    fn handler(provider: MockAiProvider, log: Arc<InMemoryEvaluationLog>) -> EvaluateResponseHandler {
        EvaluateResponseHandler::new(Arc::new(ContentCatalog::seed()), Arc::new(provider), log)
    }

    fn command(scenario_id: u32) -> EvaluateResponseCommand {
        EvaluateResponseCommand {
            scenario_id: ScenarioId::new(scenario_id),
            user_id: UserId::new("user-1").unwrap(),
            user_response: "That sounds exhausting, want to tell me about it?".to_string(),
        }
    }

    #[tokio::test]
    async fn valid_grading_is_parsed_and_logged() {
        let log = Arc::new(InMemoryEvaluationLog::new());
        let provider = MockAiProvider::new().with_response(GRADING);

        let result = handler(provider, Arc::clone(&log))
            .handle(command(1))
            .await
            .unwrap();

        assert_eq!(result.empathy_score.value(), 7.5);
        assert_eq!(result.improvements.len(), 1);
        assert_eq!(log.len(), 1);
        assert_eq!(
            log.records()[0].user_response,
            "That sounds exhausting, want to tell me about it?"
        );
    }

    #[tokio::test]
    async fn worked_example_scenarios_are_evaluable() {
        // Scenario 2 in the seed catalog is a worked example.
        let log = Arc::new(InMemoryEvaluationLog::new());
        let provider = MockAiProvider::new().with_response(GRADING);

        let result = handler(provider, log).handle(command(2)).await.unwrap();
        assert_eq!(result.empathy_score.value(), 7.5);
    }

    #[tokio::test]
    async fn provider_failure_surfaces_instead_of_fallback() {
        let log = Arc::new(InMemoryEvaluationLog::new());
        let provider = MockAiProvider::new().with_error(MockError::Unavailable {
            message: "outage".to_string(),
        });

        let err = handler(provider, Arc::clone(&log))
            .handle(command(1))
            .await
            .unwrap_err();

        assert!(matches!(err, EvaluateResponseError::EvaluationFailed(_)));
        assert_eq!(log.len(), 0);
    }

    #[tokio::test]
    async fn unparseable_grading_surfaces_as_failure() {
        let log = Arc::new(InMemoryEvaluationLog::new());
        let provider = MockAiProvider::new().with_response("I would give this a 7 out of 10.");

        let err = handler(provider, log).handle(command(1)).await.unwrap_err();
        assert!(matches!(err, EvaluateResponseError::EvaluationFailed(_)));
    }

    #[tokio::test]
    async fn empty_response_is_rejected_before_any_io() {
        let log = Arc::new(InMemoryEvaluationLog::new());
        let provider = MockAiProvider::new();
        let mut cmd = command(1);
        cmd.user_response = "  \n".to_string();

        let err = handler(provider.clone(), log)
            .handle(cmd)
            .await
            .unwrap_err();
        assert!(matches!(err, EvaluateResponseError::EmptyResponse));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn unknown_scenario_fails_not_found() {
        let log = Arc::new(InMemoryEvaluationLog::new());
        let err = handler(MockAiProvider::new(), log)
            .handle(command(999))
            .await
            .unwrap_err();
        assert!(matches!(err, EvaluateResponseError::ScenarioNotFound(_)));
    }

    #[tokio::test]
    async fn rubric_prompt_reaches_the_provider_at_low_temperature() {
        let log = Arc::new(InMemoryEvaluationLog::new());
        let provider = MockAiProvider::new().with_response(GRADING);

        handler(provider.clone(), log)
            .handle(command(1))
            .await
            .unwrap();

        let calls = provider.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].temperature, Some(EVALUATION_TEMPERATURE));
        assert!(calls[0].messages[0]
            .content
            .contains("That sounds exhausting"));
    }
}
