//! # User Repository
//!
//! Account storage in the "Users Data" table.
//!
//! ## Uniqueness
//! ```text
//! create(user)
//!      │
//!      ▼  (table locked)
//! email on file?    ── yes ──► UniqueViolation { field: "email" }
//!      │ no
//!      ▼
//! username on file? ── yes ──► UniqueViolation { field: "username" }
//!      │ no
//!      ▼
//! append + rewrite
//! ```
//!
//! Email is checked first, so a request that collides on both reports the
//! email.

use tally_core::{TableRow, User};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::table::Table;

/// Repository for user accounts.
///
/// ## Usage
/// ```rust,ignore
/// let repo = store.users();
/// repo.create(&user).await?;
/// let found = repo.find_by_credentials("a@x.com", "p").await?;
/// ```
#[derive(Debug, Clone)]
pub struct UserRepository {
    table: Table,
}

impl UserRepository {
    pub fn new(table: Table) -> Self {
        UserRepository { table }
    }

    /// Adds a user unless the email or username is taken.
    pub async fn create(&self, user: &User) -> StoreResult<()> {
        debug!(username = %user.username, email = %user.email, "Creating user");

        self.table
            .append_checked(user.to_record(), |existing| {
                if existing.iter().any(|r| r.get("email") == user.email) {
                    return Err(StoreError::duplicate("email", user.email.as_str()));
                }
                if existing.iter().any(|r| r.get("username") == user.username) {
                    return Err(StoreError::duplicate("username", user.username.as_str()));
                }
                Ok(())
            })
            .await
    }

    /// All users in file order.
    pub async fn list(&self) -> StoreResult<Vec<User>> {
        self.table.rows().await
    }

    /// First user with this exact email.
    pub async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let users = self.list().await?;
        Ok(users.into_iter().find(|u| u.email == email))
    }

    /// First user whose email and password both match exactly.
    ///
    /// Passwords are stored and compared as plain text.
    pub async fn find_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> StoreResult<Option<User>> {
        let users = self.list().await?;
        Ok(users
            .into_iter()
            .find(|u| u.email == email && u.password == password))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Store, StoreConfig};

    fn user(username: &str, email: &str, password: &str) -> User {
        User {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    async fn repo() -> UserRepository {
        Store::open(StoreConfig::in_memory()).await.unwrap().users()
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repo = repo().await;
        repo.create(&user("bob", "a@x.com", "p")).await.unwrap();

        let err = repo.create(&user("alice", "a@x.com", "q")).await.unwrap_err();
        assert_eq!(err.duplicate_field(), Some("email"));
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let repo = repo().await;
        repo.create(&user("bob", "a@x.com", "p")).await.unwrap();

        let err = repo.create(&user("bob", "new@x.com", "p")).await.unwrap_err();
        assert_eq!(err.duplicate_field(), Some("username"));
    }

    #[tokio::test]
    async fn test_email_checked_before_username() {
        let repo = repo().await;
        repo.create(&user("bob", "a@x.com", "p")).await.unwrap();

        let err = repo.create(&user("bob", "a@x.com", "p")).await.unwrap_err();
        assert_eq!(err.duplicate_field(), Some("email"));
    }

    #[tokio::test]
    async fn test_find_by_credentials() {
        let repo = repo().await;
        repo.create(&user("bob", "a@x.com", "p")).await.unwrap();

        let found = repo.find_by_credentials("a@x.com", "p").await.unwrap();
        assert_eq!(found.map(|u| u.username), Some("bob".to_string()));

        assert!(repo
            .find_by_credentials("a@x.com", "wrong")
            .await
            .unwrap()
            .is_none());
        assert!(repo.find_by_email("b@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_signups_with_same_email() {
        let repo = repo().await;

        let mut handles = Vec::new();
        for i in 0..10 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                repo.create(&user(&format!("user{i}"), "same@x.com", "p")).await
            }));
        }

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                created += 1;
            }
        }

        assert_eq!(created, 1);
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }
}
