//! # Store
//!
//! Owns the four resource tables and hands out repositories.
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Store Lifecycle                                │
//! │                                                                         │
//! │  StoreConfig::new("./data") ← data directory + backing                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Store::open(config).await                                             │
//! │       │                                                                 │
//! │       ├── users.xlsx          missing? → seed "Users Data" + headers   │
//! │       ├── subscriptions.xlsx  missing? → seed headers (plain)          │
//! │       ├── rentals.xlsx        missing? → seed "Rent User Data"         │
//! │       └── purchases.xlsx      missing? → seed "Buy Users Data"         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  store.users() / store.rentals() / ... ← repositories                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use tally_core::Resource;
use tracing::info;

use crate::error::{StoreError, StoreResult};
use crate::memory::MemoryTable;
use crate::repository::order::{PurchaseRepository, RentalRepository};
use crate::repository::subscription::SubscriptionRepository;
use crate::repository::user::UserRepository;
use crate::table::{Table, TableStore};
use crate::xlsx::XlsxTable;

// =============================================================================
// Configuration
// =============================================================================

/// Which [`TableStore`] implementation backs the tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// One `.xlsx` file per resource under the data directory.
    #[default]
    Xlsx,

    /// Process memory; lost on restart.
    Memory,
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::Xlsx => write!(f, "xlsx"),
            Backend::Memory => write!(f, "memory"),
        }
    }
}

impl FromStr for Backend {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xlsx" | "excel" | "file" => Ok(Backend::Xlsx),
            "memory" | "mem" => Ok(Backend::Memory),
            other => Err(StoreError::InvalidConfig(format!(
                "Unknown storage backend: '{}'. Valid options: xlsx, memory",
                other
            ))),
        }
    }
}

/// Store configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = StoreConfig::new("./data").backend(Backend::Xlsx);
/// let store = Store::open(config).await?;
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding the table files. Created if missing.
    pub data_dir: PathBuf,

    /// Backing implementation.
    /// Default: Xlsx
    pub backend: Backend,
}

impl StoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        StoreConfig {
            data_dir: data_dir.into(),
            backend: Backend::Xlsx,
        }
    }

    /// Sets the backing implementation.
    pub fn backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// In-memory configuration (for testing).
    pub fn in_memory() -> Self {
        StoreConfig::new(".").backend(Backend::Memory)
    }

    /// File path for `resource`.
    pub fn table_path(&self, resource: Resource) -> PathBuf {
        self.data_dir.join(resource.file_name())
    }
}

// =============================================================================
// Store
// =============================================================================

/// The four resource tables.
#[derive(Debug, Clone)]
pub struct Store {
    users: Table,
    subscriptions: Table,
    rentals: Table,
    purchases: Table,
}

impl Store {
    /// Builds the tables for `config` and seeds any that do not exist.
    pub async fn open(config: StoreConfig) -> StoreResult<Self> {
        info!(
            data_dir = %config.data_dir.display(),
            backend = %config.backend,
            "Opening store"
        );

        let store = match config.backend {
            Backend::Xlsx => Store::with_backend(|resource| {
                Arc::new(XlsxTable::new(config.table_path(resource), resource.layout()))
                    as Arc<dyn TableStore>
            }),
            Backend::Memory => {
                Store::with_backend(|resource| {
                    Arc::new(MemoryTable::new(resource.name())) as Arc<dyn TableStore>
                })
            }
        };

        store.initialize().await?;
        Ok(store)
    }

    /// Builds a store from one backing per resource, without seeding.
    pub fn with_backend<F>(mut make: F) -> Self
    where
        F: FnMut(Resource) -> Arc<dyn TableStore>,
    {
        let mut table = |resource| Table::new(resource, make(resource));
        Store {
            users: table(Resource::Users),
            subscriptions: table(Resource::Subscriptions),
            rentals: table(Resource::Rentals),
            purchases: table(Resource::Purchases),
        }
    }

    /// Seeds every table that does not exist yet.
    pub async fn initialize(&self) -> StoreResult<()> {
        for resource in Resource::ALL {
            let table = self.table(resource);
            if table.initialize().await? {
                info!(resource = %resource, "Table created");
            }
        }
        Ok(())
    }

    /// Returns the table for `resource`.
    pub fn table(&self, resource: Resource) -> &Table {
        match resource {
            Resource::Users => &self.users,
            Resource::Subscriptions => &self.subscriptions,
            Resource::Rentals => &self.rentals,
            Resource::Purchases => &self.purchases,
        }
    }

    /// Returns the user repository.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let user = store.users().find_by_email("a@x.com").await?;
    /// ```
    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.users.clone())
    }

    /// Returns the subscription repository.
    pub fn subscriptions(&self) -> SubscriptionRepository {
        SubscriptionRepository::new(self.subscriptions.clone())
    }

    /// Returns the rental repository.
    pub fn rentals(&self) -> RentalRepository {
        RentalRepository::new(self.rentals.clone())
    }

    /// Returns the purchase repository.
    pub fn purchases(&self) -> PurchaseRepository {
        PurchaseRepository::new(self.purchases.clone())
    }

    /// Checks that every table can be read.
    pub async fn health_check(&self) -> bool {
        for resource in Resource::ALL {
            if self.table(resource).read_all().await.is_err() {
                return false;
            }
        }
        true
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_in_memory_store() {
        let store = Store::open(StoreConfig::in_memory()).await.unwrap();
        assert!(store.health_check().await);
    }

    #[tokio::test]
    async fn test_open_seeds_all_files() {
        let dir = TempDir::new().unwrap();
        let config = StoreConfig::new(dir.path().join("data"));
        let store = Store::open(config.clone()).await.unwrap();

        for resource in Resource::ALL {
            assert!(config.table_path(resource).exists(), "{resource}");
            assert!(store.table(resource).read_all().await.unwrap().is_empty());
        }
        assert!(store.health_check().await);
    }

    #[tokio::test]
    async fn test_reopen_keeps_data() {
        let dir = TempDir::new().unwrap();
        let config = StoreConfig::new(dir.path());

        let store = Store::open(config.clone()).await.unwrap();
        store.subscriptions().subscribe("a@x.com").await.unwrap();

        let reopened = Store::open(config).await.unwrap();
        assert!(reopened.subscriptions().is_subscribed("a@x.com").await.unwrap());
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!("xlsx".parse::<Backend>().unwrap(), Backend::Xlsx);
        assert_eq!("Memory".parse::<Backend>().unwrap(), Backend::Memory);
        assert!("postgres".parse::<Backend>().is_err());
    }

    #[test]
    fn test_table_paths() {
        let config = StoreConfig::new("/srv/tally");
        assert_eq!(
            config.table_path(Resource::Purchases),
            PathBuf::from("/srv/tally/purchases.xlsx")
        );
    }
}
