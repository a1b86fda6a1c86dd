//! # Subscription Repository
//!
//! Newsletter emails in the plain (untitled) subscriptions table.

use tally_core::{Subscription, TableRow};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::table::Table;

/// Repository for newsletter subscriptions.
#[derive(Debug, Clone)]
pub struct SubscriptionRepository {
    table: Table,
}

impl SubscriptionRepository {
    pub fn new(table: Table) -> Self {
        SubscriptionRepository { table }
    }

    /// Subscribes `email`, failing with `UniqueViolation` if already present.
    pub async fn subscribe(&self, email: &str) -> StoreResult<Subscription> {
        debug!(email = %email, "Subscribing");

        let subscription = Subscription {
            email: email.to_string(),
        };

        self.table
            .append_checked(subscription.to_record(), |existing| {
                if existing.iter().any(|r| r.get("email") == email) {
                    return Err(StoreError::duplicate("email", email));
                }
                Ok(())
            })
            .await?;

        Ok(subscription)
    }

    pub async fn is_subscribed(&self, email: &str) -> StoreResult<bool> {
        let subscriptions = self.list().await?;
        Ok(subscriptions.iter().any(|s| s.email == email))
    }

    /// All subscriptions in file order.
    pub async fn list(&self) -> StoreResult<Vec<Subscription>> {
        self.table.rows().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Store, StoreConfig};

    #[tokio::test]
    async fn test_subscribe_once() {
        let repo = Store::open(StoreConfig::in_memory())
            .await
            .unwrap()
            .subscriptions();

        repo.subscribe("a@x.com").await.unwrap();
        assert!(repo.is_subscribed("a@x.com").await.unwrap());

        let err = repo.subscribe("a@x.com").await.unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation { .. }));
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }
}
