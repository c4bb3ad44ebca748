//! ListStageScenarios query handler.
//!
//! Resolves what a caller may see of one stage: stage metadata always, the
//! scenario list truncated by the free-tier policy unless the caller has an
//! active premium subscription. Anonymous and unknown user ids both resolve
//! as free tier, so the catalog stays browsable without an account.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::catalog::{ContentCatalog, Scenario};
use crate::domain::entitlement::{EntitlementResolver, Subscription};
use crate::domain::foundation::{StageNumber, Timestamp, UserId};
use crate::ports::UserDirectory;

/// Query for one stage's visible scenarios.
#[derive(Debug, Clone)]
pub struct ListStageScenariosQuery {
    pub stage_number: StageNumber,
    /// Caller identity; `None` for anonymous browsing.
    pub user_id: Option<UserId>,
}

/// Errors that can occur when listing stage scenarios.
#[derive(Debug, Clone, Error)]
pub enum ListStageScenariosError {
    /// No stage with this number exists.
    #[error("Stage not found: {0}")]
    StageNotFound(StageNumber),

    /// The user lookup failed.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

/// Read model of one stage with entitlement applied.
#[derive(Debug, Clone)]
pub struct StageScenariosView {
    pub stage_number: StageNumber,
    pub stage_title: String,
    pub stage_description: String,
    /// Scenarios the caller may see, in catalog order.
    pub scenarios: Vec<Scenario>,
    /// Total scenario count in the stage.
    pub total: usize,
    /// Count withheld behind the premium tier.
    pub locked: usize,
}

/// Handler for ListStageScenarios queries.
pub struct ListStageScenariosHandler {
    catalog: Arc<ContentCatalog>,
    users: Arc<dyn UserDirectory>,
    resolver: EntitlementResolver,
}

impl ListStageScenariosHandler {
    /// Creates a new handler with the given dependencies.
    pub fn new(
        catalog: Arc<ContentCatalog>,
        users: Arc<dyn UserDirectory>,
        resolver: EntitlementResolver,
    ) -> Self {
        Self {
            catalog,
            users,
            resolver,
        }
    }

    /// Handles a list stage scenarios query.
    pub async fn handle(
        &self,
        query: ListStageScenariosQuery,
    ) -> Result<StageScenariosView, ListStageScenariosError> {
        let subscription: Option<Subscription> = match &query.user_id {
            Some(user_id) => self
                .users
                .find(user_id)
                .await
                .map_err(|e| ListStageScenariosError::Persistence(e.to_string()))?
                .map(|record| record.subscription),
            None => None,
        };

        let resolved = self
            .resolver
            .resolve_visible_scenarios(
                self.catalog.as_ref(),
                query.stage_number,
                subscription.as_ref(),
                Timestamp::now(),
            )
            .map_err(|_| ListStageScenariosError::StageNotFound(query.stage_number))?;

        Ok(StageScenariosView {
            stage_number: resolved.stage.number,
            stage_title: resolved.stage.title.clone(),
            stage_description: resolved.stage.description.clone(),
            scenarios: resolved.visible.to_vec(),
            total: resolved.total,
            locked: resolved.locked(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryUserDirectory;
    use crate::domain::entitlement::EntitlementPolicy;

    fn handler(users: Arc<InMemoryUserDirectory>) -> ListStageScenariosHandler {
        ListStageScenariosHandler::new(
            Arc::new(ContentCatalog::seed()),
            users,
            EntitlementResolver::new(EntitlementPolicy::default()),
        )
    }

    fn query(stage: u32, user_id: Option<&str>) -> ListStageScenariosQuery {
        ListStageScenariosQuery {
            stage_number: StageNumber::new(stage),
            user_id: user_id.map(|id| UserId::new(id).unwrap()),
        }
    }

    #[tokio::test]
    async fn anonymous_caller_gets_free_prefix() {
        let view = handler(Arc::new(InMemoryUserDirectory::new()))
            .handle(query(1, None))
            .await
            .unwrap();

        assert_eq!(view.scenarios.len(), 5);
        assert_eq!(view.total, 6);
        assert_eq!(view.locked, 1);
        assert!(!view.stage_title.is_empty());
    }

    #[tokio::test]
    async fn unknown_user_id_is_treated_as_free_tier() {
        let view = handler(Arc::new(InMemoryUserDirectory::new()))
            .handle(query(1, Some("ghost")))
            .await
            .unwrap();
        assert_eq!(view.scenarios.len(), 5);
    }

    #[tokio::test]
    async fn premium_user_sees_the_whole_stage() {
        let users = Arc::new(InMemoryUserDirectory::new());
        let id = UserId::new("premium-1").unwrap();
        users.insert(id, Subscription::active(Some(Timestamp::now().add_days(30))));

        let view = handler(users).handle(query(1, Some("premium-1"))).await.unwrap();
        assert_eq!(view.scenarios.len(), view.total);
        assert_eq!(view.locked, 0);
    }

    #[tokio::test]
    async fn free_user_sees_stage_two_metadata_only() {
        let users = Arc::new(InMemoryUserDirectory::new());
        let id = UserId::new("free-1").unwrap();
        users.insert(id, Subscription::free());

        let view = handler(users).handle(query(2, Some("free-1"))).await.unwrap();
        assert!(view.scenarios.is_empty());
        assert!(view.locked > 0);
        assert!(!view.stage_description.is_empty());
    }

    #[tokio::test]
    async fn unknown_stage_fails_not_found() {
        let err = handler(Arc::new(InMemoryUserDirectory::new()))
            .handle(query(42, None))
            .await
            .unwrap_err();
        assert!(matches!(err, ListStageScenariosError::StageNotFound(_)));
    }
}
