//! User directory port, read-only from this core.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::entitlement::Subscription;
use crate::domain::foundation::{DomainError, UserId};

/// A user record as the account system exposes it to the engine.
///
/// Subscription fields are mutated exclusively by the billing webhook
/// collaborator; this core only reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub subscription: Subscription,
}

/// Port for user lookups.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Finds a user by id. `None` when unknown.
    async fn find(&self, id: &UserId) -> Result<Option<UserRecord>, DomainError>;
}
