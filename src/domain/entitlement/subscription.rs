//! Subscription state as read from the account system.
//!
//! This module only reads subscription fields. Status transitions happen
//! exclusively in the billing webhook collaborator; nothing here mutates
//! them.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// Subscription status of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// No paid subscription.
    Free,
    /// Paid subscription, possibly with an expiry date.
    Active,
    /// User requested cancellation.
    Cancelled,
    /// Subscription ended.
    Expired,
}

/// Snapshot of a user's subscription, read-only from this core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub status: SubscriptionStatus,
    /// Billing plan name, informational only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
    /// When the current paid period ends. Absent means no expiry on record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<Timestamp>,
}

impl Subscription {
    /// Creates a free-tier subscription snapshot.
    pub fn free() -> Self {
        Self {
            status: SubscriptionStatus::Free,
            plan: None,
            expires_at: None,
        }
    }

    /// Creates an active subscription with an optional expiry.
    pub fn active(expires_at: Option<Timestamp>) -> Self {
        Self {
            status: SubscriptionStatus::Active,
            plan: None,
            expires_at,
        }
    }

    /// Whether this subscription grants premium content at the given instant.
    ///
    /// Premium requires `Active` status and an expiry that is absent or not
    /// yet passed. Any other status yields false, including `Cancelled`
    /// records that may still be inside their paid period; the account
    /// system flips those back to `Active` on reactivation.
    pub fn has_premium(&self, at: Timestamp) -> bool {
        if self.status != SubscriptionStatus::Active {
            return false;
        }
        match self.expires_at {
            None => true,
            Some(expiry) => expiry >= at,
        }
    }
}
