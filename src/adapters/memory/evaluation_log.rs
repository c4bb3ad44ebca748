//! In-memory evaluation audit log.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::ports::{EvaluationLog, EvaluationRecord};

/// In-memory implementation of [`EvaluationLog`].
///
/// Append-only; exposes the record count so tests can assert the audit
/// trail was written.
#[derive(Debug, Default)]
pub struct InMemoryEvaluationLog {
    records: RwLock<Vec<EvaluationRecord>>,
}

impl InMemoryEvaluationLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded evaluations.
    pub fn len(&self) -> usize {
        self.records.read().unwrap().len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of all records, oldest first.
    pub fn records(&self) -> Vec<EvaluationRecord> {
        self.records.read().unwrap().clone()
    }
}

#[async_trait]
impl EvaluationLog for InMemoryEvaluationLog {
    async fn record(&self, record: EvaluationRecord) -> Result<(), DomainError> {
        self.records.write().unwrap().push(record);
        Ok(())
    }
}
