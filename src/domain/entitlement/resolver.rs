//! Entitlement resolution: which scenarios of a stage a user may see.
//!
//! A pure decision procedure over `(subscription, stage, now)`. Results are
//! never cached because premium status is time-dependent.

use crate::domain::catalog::{ContentCatalog, Scenario, Stage};
use crate::domain::foundation::{DomainError, ErrorCode, StageNumber, Timestamp};

use super::subscription::Subscription;

/// Free-tier visibility policy, injected via configuration.
///
/// Maps a stage number to the count of scenarios visible without a premium
/// subscription. Stages not listed are fully locked for free users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitlementPolicy {
    free_limits: Vec<(StageNumber, usize)>,
}

impl EntitlementPolicy {
    /// Creates a policy from explicit per-stage limits.
    pub fn new(free_limits: Vec<(StageNumber, usize)>) -> Self {
        Self { free_limits }
    }

    /// Free scenarios allowed for the given stage. Zero when unlisted.
    pub fn free_limit(&self, stage: StageNumber) -> usize {
        self.free_limits
            .iter()
            .find(|(n, _)| *n == stage)
            .map(|(_, limit)| *limit)
            .unwrap_or(0)
    }
}

impl Default for EntitlementPolicy {
    /// Product default: stage 1 offers five free scenarios, deeper stages
    /// are premium-only.
    fn default() -> Self {
        Self::new(vec![(StageNumber::new(1), 5)])
    }
}

/// Result of an entitlement resolution for one stage.
#[derive(Debug, Clone)]
pub struct VisibleScenarios<'a> {
    /// The stage itself; metadata is visible regardless of entitlement.
    pub stage: &'a Stage,
    /// The scenarios the caller may see, in catalog order.
    pub visible: &'a [Scenario],
    /// Total scenario count in the stage, for locked-content teasers.
    pub total: usize,
}

impl VisibleScenarios<'_> {
    /// Count of scenarios withheld from the caller.
    pub fn locked(&self) -> usize {
        self.total - self.visible.len()
    }
}

/// Resolves scenario visibility against the catalog and a policy.
#[derive(Debug, Clone)]
pub struct EntitlementResolver {
    policy: EntitlementPolicy,
}

impl EntitlementResolver {
    /// Creates a resolver with the given policy.
    pub fn new(policy: EntitlementPolicy) -> Self {
        Self { policy }
    }

    /// Computes the visible scenario prefix for a stage.
    ///
    /// Premium subscribers see the full list; everyone else sees the
    /// policy's free-tier prefix in original order. A zero limit yields an
    /// empty list, not an error: stage metadata stays visible, only its
    /// scenario content is withheld.
    ///
    /// # Errors
    ///
    /// - `StageNotFound` if the stage does not exist in the catalog.
    pub fn resolve_visible_scenarios<'a>(
        &self,
        catalog: &'a ContentCatalog,
        stage_number: StageNumber,
        subscription: Option<&Subscription>,
        at: Timestamp,
    ) -> Result<VisibleScenarios<'a>, DomainError> {
        let stage = catalog.stage(stage_number).ok_or_else(|| {
            DomainError::new(ErrorCode::StageNotFound, "Stage not found")
                .with_detail("stage_number", stage_number.to_string())
        })?;

        let has_premium = subscription.is_some_and(|s| s.has_premium(at));
        let total = stage.scenarios.len();

        let visible = if has_premium {
            &stage.scenarios[..]
        } else {
            let limit = self.policy.free_limit(stage_number).min(total);
            &stage.scenarios[..limit]
        };

        Ok(VisibleScenarios {
            stage,
            visible,
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ScenarioId;

    fn resolver() -> EntitlementResolver {
        EntitlementResolver::new(EntitlementPolicy::default())
    }

    fn catalog() -> ContentCatalog {
        ContentCatalog::seed()
    }

    #[test]
    fn anonymous_user_sees_free_prefix_of_stage_one() {
        let catalog = catalog();
        let result = resolver()
            .resolve_visible_scenarios(&catalog, StageNumber::new(1), None, Timestamp::now())
            .unwrap();

        assert_eq!(result.visible.len(), 5);
        let expected: Vec<ScenarioId> = result.stage.scenarios[..5].iter().map(|s| s.id).collect();
        let actual: Vec<ScenarioId> = result.visible.iter().map(|s| s.id).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn anonymous_user_sees_no_stage_two_scenarios_but_stage_metadata() {
        let catalog = catalog();
        let result = resolver()
            .resolve_visible_scenarios(&catalog, StageNumber::new(2), None, Timestamp::now())
            .unwrap();

        assert!(result.visible.is_empty());
        assert!(!result.stage.title.is_empty());
        assert!(result.locked() > 0);
    }

    #[test]
    fn premium_user_sees_everything() {
        let catalog = catalog();
        let now = Timestamp::now();
        let sub = Subscription::active(Some(now.add_days(30)));

        for stage in [StageNumber::new(1), StageNumber::new(2)] {
            let result = resolver()
                .resolve_visible_scenarios(&catalog, stage, Some(&sub), now)
                .unwrap();
            assert_eq!(result.visible.len(), result.total);
            assert_eq!(result.locked(), 0);
        }
    }

    #[test]
    fn expired_active_record_falls_back_to_free_tier() {
        let catalog = catalog();
        let now = Timestamp::now();
        let sub = Subscription::active(Some(now.minus_days(1)));

        let result = resolver()
            .resolve_visible_scenarios(&catalog, StageNumber::new(2), Some(&sub), now)
            .unwrap();
        assert!(result.visible.is_empty());
    }

    #[test]
    fn free_subscription_gets_free_prefix() {
        let catalog = catalog();
        let sub = Subscription::free();
        let result = resolver()
            .resolve_visible_scenarios(
                &catalog,
                StageNumber::new(1),
                Some(&sub),
                Timestamp::now(),
            )
            .unwrap();
        assert_eq!(result.visible.len(), 5);
    }

    #[test]
    fn unknown_stage_is_not_found() {
        let catalog = catalog();
        let err = resolver()
            .resolve_visible_scenarios(&catalog, StageNumber::new(42), None, Timestamp::now())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::StageNotFound);
    }

    #[test]
    fn limit_larger_than_stage_is_clamped() {
        let catalog = catalog();
        let policy = EntitlementPolicy::new(vec![(StageNumber::new(2), 50)]);
        let result = EntitlementResolver::new(policy)
            .resolve_visible_scenarios(&catalog, StageNumber::new(2), None, Timestamp::now())
            .unwrap();
        assert_eq!(result.visible.len(), result.total);
    }
}
