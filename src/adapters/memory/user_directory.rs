//! In-memory user directory.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::entitlement::Subscription;
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::{UserDirectory, UserRecord};

/// In-memory implementation of [`UserDirectory`] for tests and development.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<UserId, UserRecord>>,
}

impl InMemoryUserDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a user record.
    pub fn insert(&self, id: UserId, subscription: Subscription) {
        let record = UserRecord {
            id: id.clone(),
            subscription,
        };
        self.users.write().unwrap().insert(id, record);
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find(&self, id: &UserId) -> Result<Option<UserRecord>, DomainError> {
        Ok(self.users.read().unwrap().get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_and_find() {
        let directory = InMemoryUserDirectory::new();
        let id = UserId::new("user-1").unwrap();
        directory.insert(id.clone(), Subscription::free());

        let record = directory.find(&id).await.unwrap().unwrap();
        assert_eq!(record.id, id);
    }

    #[tokio::test]
    async fn unknown_user_is_none() {
        let directory = InMemoryUserDirectory::new();
        let id = UserId::new("ghost").unwrap();
        assert!(directory.find(&id).await.unwrap().is_none());
    }
}
