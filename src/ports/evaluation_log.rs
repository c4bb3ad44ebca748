//! Evaluation audit log port.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::evaluation::EvaluationResult;
use crate::domain::foundation::{DomainError, ScenarioId, Timestamp, UserId};

/// One recorded evaluation with its context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub user_id: UserId,
    pub scenario_id: ScenarioId,
    /// The response that was evaluated.
    pub user_response: String,
    pub result: EvaluationResult,
    pub recorded_at: Timestamp,
}

/// Write-only audit trail of evaluations. Never read back by the core.
#[async_trait]
pub trait EvaluationLog: Send + Sync {
    /// Records one evaluation.
    async fn record(&self, record: EvaluationRecord) -> Result<(), DomainError>;
}
