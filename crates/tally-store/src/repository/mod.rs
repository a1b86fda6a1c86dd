//! # Repository Module
//!
//! Typed access to the resource tables.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  store.users().create(&user)                                   │
//! │       ▼                                                                 │
//! │  UserRepository                                                        │
//! │  ├── create(&self, user)          ← email / username uniqueness        │
//! │  ├── find_by_email(&self, email)                                       │
//! │  └── find_by_credentials(&self, email, password)                       │
//! │       │                                                                 │
//! │       │  Table::append_checked / Table::rows                           │
//! │       ▼                                                                 │
//! │  TableStore (xlsx file or memory)                                      │
//! │                                                                         │
//! │  Handlers never see records or sheets, only typed rows.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`UserRepository`](user::UserRepository) - Accounts
//! - [`SubscriptionRepository`](subscription::SubscriptionRepository) - Newsletter emails
//! - [`RentalRepository`](order::RentalRepository) /
//!   [`PurchaseRepository`](order::PurchaseRepository) - Orders by email

pub mod order;
pub mod subscription;
pub mod user;
