//! # Tables
//!
//! The storage interface every backing implements, and the guarded
//! [`Table`] handle the repositories work through.
//!
//! ## Read-Modify-Write
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 Table::append_checked(record, check)                    │
//! │                                                                         │
//! │  lock(table guard) ─────────────────────────────────────┐               │
//! │       │                                                 │ held          │
//! │       ▼                                                 │               │
//! │  backend.read_all()      ← full table into memory       │               │
//! │       │                                                 │               │
//! │       ▼                                                 │               │
//! │  check(&records)?        ← e.g. email already on file   │               │
//! │       │                                                 │               │
//! │       ▼                                                 │               │
//! │  records.push(record)                                   │               │
//! │  backend.write_all()     ← full table rewritten         │               │
//! │       │                                                 │               │
//! │  unlock ◄───────────────────────────────────────────────┘               │
//! │                                                                         │
//! │  Two appends to the same table never interleave, so a uniqueness       │
//! │  check always sees the previous append. Reads take no lock.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use tally_core::{Record, Resource, TableRow};
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::StoreResult;

// =============================================================================
// Storage Interface
// =============================================================================

/// A persisted, ordered list of records.
///
/// Each implementation is bound to one location (file path, memory slot)
/// and one layout when constructed.
#[async_trait]
pub trait TableStore: Send + Sync + Debug {
    /// Creates the table with a header row taken from `shape` and zero data
    /// rows. Does nothing if the table already exists.
    ///
    /// ## Returns
    /// * `Ok(true)` - Table was created
    /// * `Ok(false)` - Table already existed
    async fn initialize(&self, shape: &Record) -> StoreResult<bool>;

    /// Reads every data row, skipping title and header rows.
    async fn read_all(&self) -> StoreResult<Vec<Record>>;

    /// Replaces the whole table with `records`.
    ///
    /// Headers come from the records' keys in order of first appearance;
    /// `shape` supplies them when `records` is empty.
    async fn write_all(&self, records: &[Record], shape: &Record) -> StoreResult<()>;
}

/// Header names for a write: union of record keys in first-seen order, or
/// the shape's keys when there are no records.
pub fn header_columns(records: &[Record], shape: &Record) -> Vec<String> {
    if records.is_empty() {
        return shape.columns().map(str::to_string).collect();
    }

    let mut columns: Vec<String> = Vec::new();
    for record in records {
        for column in record.columns() {
            if !columns.iter().any(|c| c == column) {
                columns.push(column.to_string());
            }
        }
    }
    columns
}

// =============================================================================
// Guarded Table
// =============================================================================

/// A resource's backing plus the lock that serializes its mutations.
///
/// Cloning is cheap; clones share the backing and the lock.
#[derive(Debug, Clone)]
pub struct Table {
    resource: Resource,
    backend: Arc<dyn TableStore>,
    guard: Arc<Mutex<()>>,
}

impl Table {
    /// Wraps `backend` as the table for `resource`.
    pub fn new(resource: Resource, backend: Arc<dyn TableStore>) -> Self {
        Table {
            resource,
            backend,
            guard: Arc::new(Mutex::new(())),
        }
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }

    /// Empty record carrying this resource's columns.
    pub fn shape(&self) -> Record {
        Record::blank(self.resource.columns())
    }

    /// Seeds the backing if it does not exist yet.
    pub async fn initialize(&self) -> StoreResult<bool> {
        self.backend.initialize(&self.shape()).await
    }

    /// Reads all records.
    pub async fn read_all(&self) -> StoreResult<Vec<Record>> {
        self.backend.read_all().await
    }

    /// Reads all records as typed rows.
    pub async fn rows<T: TableRow>(&self) -> StoreResult<Vec<T>> {
        let records = self.read_all().await?;
        Ok(records.iter().map(T::from_record).collect())
    }

    /// Appends a record with no uniqueness check.
    pub async fn append(&self, record: Record) -> StoreResult<()> {
        self.append_checked(record, |_| Ok(())).await
    }

    /// Appends a record if `check` accepts the current contents.
    ///
    /// `check` sees a snapshot taken under the table lock. If it returns an
    /// error the table is left untouched and the error is returned.
    pub async fn append_checked<F>(&self, record: Record, check: F) -> StoreResult<()>
    where
        F: FnOnce(&[Record]) -> StoreResult<()> + Send,
    {
        let _guard = self.guard.lock().await;

        let mut records = self.backend.read_all().await?;
        check(records.as_slice())?;

        records.push(record);
        self.backend.write_all(&records, &self.shape()).await?;

        debug!(
            resource = %self.resource,
            rows = records.len(),
            "Appended record"
        );
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
