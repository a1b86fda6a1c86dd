//! # Domain Types
//!
//! Resources, table layouts and the typed rows stored in each table.
//!
//! ## Table Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Resource        File                Title            Columns           │
//! │  ─────────────   ─────────────────   ──────────────   ────────────────  │
//! │  Users           users.xlsx          Users Data       username, email,  │
//! │                                                       password          │
//! │  Subscriptions   subscriptions.xlsx  (plain)          email             │
//! │  Rentals         rentals.xlsx        Rent User Data   name, email,      │
//! │                                                       phone, category,  │
//! │                                                       duration          │
//! │  Purchases       purchases.xlsx      Buy Users Data   name, email,      │
//! │                                                       phone, category,  │
//! │                                                       quantity          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Sheet Layouts
//! ```text
//!   Titled                          Plain
//!   ┌──────────────┬─────┬──────┐   ┌───────────┐
//! 1 │ Users Data   │     │      │ 1 │ email     │ ← headers
//! 2 │ username     │email│passwd│ 2 │ a@x.com   │ ← data
//! 3 │ bob          │a@x… │ p    │ 3 │ b@x.com   │
//!   └──────────────┴─────┴──────┘   └───────────┘
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::record::Record;

// =============================================================================
// Table Layout
// =============================================================================

/// Where the header row sits in a sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableLayout {
    /// Title in A1, headers on row 2, data from row 3.
    Titled(String),

    /// Headers on row 1, data from row 2.
    Plain,
}

impl TableLayout {
    /// Creates a titled layout.
    pub fn titled(title: impl Into<String>) -> Self {
        TableLayout::Titled(title.into())
    }

    /// Returns the title, if any.
    pub fn title(&self) -> Option<&str> {
        match self {
            TableLayout::Titled(title) => Some(title),
            TableLayout::Plain => None,
        }
    }

    /// Zero-based index of the header row.
    pub fn header_row(&self) -> u32 {
        match self {
            TableLayout::Titled(_) => 1,
            TableLayout::Plain => 0,
        }
    }

    /// Zero-based index of the first data row.
    pub fn first_data_row(&self) -> u32 {
        self.header_row() + 1
    }
}

// =============================================================================
// Resource
// =============================================================================

/// One of the four named tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Users,
    Subscriptions,
    Rentals,
    Purchases,
}

impl Resource {
    /// Every resource, in seeding order.
    pub const ALL: [Resource; 4] = [
        Resource::Users,
        Resource::Subscriptions,
        Resource::Rentals,
        Resource::Purchases,
    ];

    /// Short lowercase name, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Resource::Users => "users",
            Resource::Subscriptions => "subscriptions",
            Resource::Rentals => "rentals",
            Resource::Purchases => "purchases",
        }
    }

    /// File name inside the data directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            Resource::Users => "users.xlsx",
            Resource::Subscriptions => "subscriptions.xlsx",
            Resource::Rentals => "rentals.xlsx",
            Resource::Purchases => "purchases.xlsx",
        }
    }

    /// Title written to A1. Subscriptions have none.
    pub fn title(&self) -> Option<&'static str> {
        match self {
            Resource::Users => Some("Users Data"),
            Resource::Subscriptions => None,
            Resource::Rentals => Some("Rent User Data"),
            Resource::Purchases => Some("Buy Users Data"),
        }
    }

    /// Sheet layout for this resource.
    pub fn layout(&self) -> TableLayout {
        match self.title() {
            Some(title) => TableLayout::titled(title),
            None => TableLayout::Plain,
        }
    }

    /// Fixed column list.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Resource::Users => User::COLUMNS,
            Resource::Subscriptions => Subscription::COLUMNS,
            Resource::Rentals => Rental::COLUMNS,
            Resource::Purchases => Purchase::COLUMNS,
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Table Row
// =============================================================================

/// A typed row that maps onto one table.
///
/// `from_record` never fails: a column the record lacks reads as `""`,
/// exactly like a blank cell.
pub trait TableRow: Sized {
    /// The table this row lives in.
    const RESOURCE: Resource;

    /// Header names, in sheet order.
    const COLUMNS: &'static [&'static str];

    /// Builds the row from a stored record.
    fn from_record(record: &Record) -> Self;

    /// Converts the row into a record with columns in [`Self::COLUMNS`] order.
    fn to_record(&self) -> Record;
}

/// Rows that belong to a customer, keyed by email.
pub trait OrderRow: TableRow {
    fn email(&self) -> &str;
}

// =============================================================================
// User
// =============================================================================

/// A registered account.
///
/// The password is stored and compared as plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct User {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl TableRow for User {
    const RESOURCE: Resource = Resource::Users;
    const COLUMNS: &'static [&'static str] = &["username", "email", "password"];

    fn from_record(record: &Record) -> Self {
        User {
            username: record.get("username").to_string(),
            email: record.get("email").to_string(),
            password: record.get("password").to_string(),
        }
    }

    fn to_record(&self) -> Record {
        Record::new()
            .with("username", self.username.as_str())
            .with("email", self.email.as_str())
            .with("password", self.password.as_str())
    }
}

// =============================================================================
// Subscription
// =============================================================================

/// A newsletter subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Subscription {
    pub email: String,
}

impl TableRow for Subscription {
    const RESOURCE: Resource = Resource::Subscriptions;
    const COLUMNS: &'static [&'static str] = &["email"];

    fn from_record(record: &Record) -> Self {
        Subscription {
            email: record.get("email").to_string(),
        }
    }

    fn to_record(&self) -> Record {
        Record::new().with("email", self.email.as_str())
    }
}

// =============================================================================
// Rental
// =============================================================================

/// A rental request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rental {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub category: String,
    pub duration: String,
}

impl TableRow for Rental {
    const RESOURCE: Resource = Resource::Rentals;
    const COLUMNS: &'static [&'static str] = &["name", "email", "phone", "category", "duration"];

    fn from_record(record: &Record) -> Self {
        Rental {
            name: record.get("name").to_string(),
            email: record.get("email").to_string(),
            phone: record.get("phone").to_string(),
            category: record.get("category").to_string(),
            duration: record.get("duration").to_string(),
        }
    }

    fn to_record(&self) -> Record {
        Record::new()
            .with("name", self.name.as_str())
            .with("email", self.email.as_str())
            .with("phone", self.phone.as_str())
            .with("category", self.category.as_str())
            .with("duration", self.duration.as_str())
    }
}

impl OrderRow for Rental {
    fn email(&self) -> &str {
        &self.email
    }
}

// =============================================================================
// Purchase
// =============================================================================

/// A purchase request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Purchase {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub category: String,
    pub quantity: String,
}

impl TableRow for Purchase {
    const RESOURCE: Resource = Resource::Purchases;
    const COLUMNS: &'static [&'static str] = &["name", "email", "phone", "category", "quantity"];

    fn from_record(record: &Record) -> Self {
        Purchase {
            name: record.get("name").to_string(),
            email: record.get("email").to_string(),
            phone: record.get("phone").to_string(),
            category: record.get("category").to_string(),
            quantity: record.get("quantity").to_string(),
        }
    }

    fn to_record(&self) -> Record {
        Record::new()
            .with("name", self.name.as_str())
            .with("email", self.email.as_str())
            .with("phone", self.phone.as_str())
            .with("category", self.category.as_str())
            .with("quantity", self.quantity.as_str())
    }
}

impl OrderRow for Purchase {
    fn email(&self) -> &str {
        &self.email
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layouts() {
        assert_eq!(
            Resource::Users.layout(),
            TableLayout::Titled("Users Data".to_string())
        );
        assert_eq!(Resource::Subscriptions.layout(), TableLayout::Plain);
        assert_eq!(Resource::Rentals.title(), Some("Rent User Data"));
        assert_eq!(Resource::Purchases.title(), Some("Buy Users Data"));

        assert_eq!(TableLayout::titled("t").header_row(), 1);
        assert_eq!(TableLayout::titled("t").first_data_row(), 2);
        assert_eq!(TableLayout::Plain.header_row(), 0);
        assert_eq!(TableLayout::Plain.first_data_row(), 1);
    }

    #[test]
    fn test_columns_follow_row_types() {
        for resource in Resource::ALL {
            assert!(!resource.columns().is_empty());
            assert!(resource.columns().contains(&"email"), "{resource}");
        }
        assert_eq!(Resource::Purchases.columns()[4], "quantity");
        assert_eq!(Resource::Rentals.columns()[4], "duration");
    }

    #[test]
    fn test_row_record_columns_in_order() {
        let rental = Rental {
            name: "Ann".to_string(),
            email: "a@x.com".to_string(),
            phone: "555".to_string(),
            category: "bikes".to_string(),
            duration: "3".to_string(),
        };

        let record = rental.to_record();
        let columns: Vec<_> = record.columns().collect();
        assert_eq!(columns, Rental::COLUMNS);
        assert_eq!(Rental::from_record(&record), rental);
    }

    #[test]
    fn test_from_record_fills_missing_columns() {
        let record = Record::new().with("email", "a@x.com");
        let purchase = Purchase::from_record(&record);

        assert_eq!(purchase.email, "a@x.com");
        assert_eq!(purchase.name, "");
        assert_eq!(purchase.quantity, "");
    }
}
