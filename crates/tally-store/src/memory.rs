//! # In-Memory Backing
//!
//! A [`TableStore`] that keeps records in process memory.
//!
//! Behaves like the xlsx backing as far as callers can tell: records are
//! projected onto the header columns on write (missing keys become `""`),
//! blank rows vanish on read, and reading a table that was never
//! initialized fails with `Unavailable`. Nothing survives a restart.

use async_trait::async_trait;
use tally_core::Record;
use tokio::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::table::{header_columns, TableStore};

#[derive(Debug, Default)]
struct MemoryState {
    /// `None` until initialized.
    rows: Option<Vec<Record>>,
    writes: usize,
}

/// In-memory table.
#[derive(Debug)]
pub struct MemoryTable {
    name: String,
    state: RwLock<MemoryState>,
}

impl MemoryTable {
    /// Creates an uninitialized table; `name` only appears in errors.
    pub fn new(name: impl Into<String>) -> Self {
        MemoryTable {
            name: name.into(),
            state: RwLock::new(MemoryState::default()),
        }
    }

    /// Number of completed `write_all` calls. Seeding is not counted.
    pub async fn write_count(&self) -> usize {
        self.state.read().await.writes
    }

    fn location(&self) -> String {
        format!("memory://{}", self.name)
    }
}

#[async_trait]
impl TableStore for MemoryTable {
    async fn initialize(&self, _shape: &Record) -> StoreResult<bool> {
        let mut state = self.state.write().await;
        if state.rows.is_some() {
            return Ok(false);
        }
        state.rows = Some(Vec::new());
        Ok(true)
    }

    async fn read_all(&self) -> StoreResult<Vec<Record>> {
        let state = self.state.read().await;
        let rows = state.rows.as_ref().ok_or_else(|| StoreError::Unavailable {
            path: self.location(),
            reason: "table not initialized".to_string(),
        })?;

        Ok(rows.iter().filter(|r| !r.is_blank()).cloned().collect())
    }

    async fn write_all(&self, records: &[Record], shape: &Record) -> StoreResult<()> {
        let columns = header_columns(records, shape);
        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|c| (c.as_str(), record.get(c)))
                    .collect::<Record>()
            })
            .collect();

        let mut state = self.state.write().await;
        state.rows = Some(rows);
        state.writes += 1;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
