//! # tally-core: Pure Types for Tally
//!
//! Everything in this crate is free of I/O. The storage crate turns these
//! types into spreadsheet rows; the API crate turns them into JSON.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Tally Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/api (axum)                              │   │
//! │  │   /api/signup  /api/login  /api/rent  /api/orders  ...          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ SignupRequest::validate() → User       │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  record   │  │   types   │  │    dto    │  │ validation│  │   │
//! │  │   │  Record   │  │  Resource │  │  Requests │  │  require  │  │   │
//! │  │   │           │  │  TableRow │  │ Responses │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 tally-store (Storage Layer)                     │   │
//! │  │            titled .xlsx tables, repositories                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`record`] - Ordered column → value mapping (one spreadsheet row)
//! - [`types`] - Resources, table layouts and typed rows
//! - [`dto`] - HTTP request and response bodies
//! - [`error`] - Validation errors
//! - [`validation`] - Presence checks
//!
//! ## Example Usage
//!
//! ```rust
//! use tally_core::{Record, TableRow, User};
//!
//! let user = User {
//!     username: "bob".to_string(),
//!     email: "a@x.com".to_string(),
//!     password: "p".to_string(),
//! };
//!
//! let record = user.to_record();
//! assert_eq!(record.get("email"), "a@x.com");
//! assert_eq!(User::from_record(&record), user);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod dto;
pub mod error;
pub mod record;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::ValidationError;
pub use record::Record;
pub use types::*;
