//! # tally-store: Spreadsheet Storage for Tally
//!
//! This crate persists Tally's four resources (users, subscriptions,
//! rentals, purchases) as one `.xlsx` workbook each.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Tally Data Flow                                │
//! │                                                                         │
//! │  HTTP handler (POST /signup)                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   tally-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │    Store      │    │  Repositories │    │    Table     │  │   │
//! │  │   │  (store.rs)   │    │ (repository/) │    │  (table.rs)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ StoreConfig   │    │ UserRepo      │    │ per-table    │  │   │
//! │  │   │ seeding       │───►│ Subscription  │───►│ lock +       │  │   │
//! │  │   │               │    │ Rental/Buy    │    │ TableStore   │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                    │            │   │
//! │  └────────────────────────────────────────────────────┼────────────┘   │
//! │                                        ┌──────────────┴──────────┐     │
//! │                                        ▼                         ▼     │
//! │                               XlsxTable (xlsx.rs)    MemoryTable       │
//! │                               users.xlsx, ...        (memory.rs)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - Store construction, configuration and table seeding
//! - [`table`] - The `TableStore` interface and the guarded `Table`
//! - [`xlsx`] - Workbook-backed tables
//! - [`memory`] - In-process tables for tests
//! - [`repository`] - Typed repositories per resource
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tally_store::{Store, StoreConfig};
//!
//! let store = Store::open(StoreConfig::new("./data")).await?;
//!
//! store.users().create(&user).await?;
//! let rentals = store.rentals().list_by_email("a@x.com").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod memory;
pub mod repository;
pub mod store;
pub mod table;
pub mod xlsx;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use memory::MemoryTable;
pub use store::{Backend, Store, StoreConfig};
pub use table::{Table, TableStore};
pub use xlsx::XlsxTable;

// Repository re-exports for convenience
pub use repository::order::{OrderRepository, PurchaseRepository, RentalRepository};
pub use repository::subscription::SubscriptionRepository;
pub use repository::user::UserRepository;
