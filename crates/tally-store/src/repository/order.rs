//! # Order Repositories
//!
//! Rentals and purchases share one shape of access: append without any
//! uniqueness rule, list by customer email.

use std::marker::PhantomData;

use tally_core::{OrderRow, Purchase, Rental};
use tracing::debug;

use crate::error::StoreResult;
use crate::table::Table;

/// Repository for rental requests.
pub type RentalRepository = OrderRepository<Rental>;

/// Repository for purchase requests.
pub type PurchaseRepository = OrderRepository<Purchase>;

/// Append-only order table keyed by customer email.
#[derive(Debug)]
pub struct OrderRepository<T> {
    table: Table,
    _row: PhantomData<fn() -> T>,
}

impl<T> Clone for OrderRepository<T> {
    fn clone(&self) -> Self {
        OrderRepository {
            table: self.table.clone(),
            _row: PhantomData,
        }
    }
}

impl<T: OrderRow> OrderRepository<T> {
    pub fn new(table: Table) -> Self {
        OrderRepository {
            table,
            _row: PhantomData,
        }
    }

    /// Appends an order. The same customer may order any number of times.
    pub async fn create(&self, order: &T) -> StoreResult<()> {
        debug!(resource = %T::RESOURCE, email = %order.email(), "Creating order");
        self.table.append(order.to_record()).await
    }

    /// All orders in file order.
    pub async fn list(&self) -> StoreResult<Vec<T>> {
        self.table.rows().await
    }

    /// Orders whose email matches exactly, in file order.
    pub async fn list_by_email(&self, email: &str) -> StoreResult<Vec<T>> {
        let orders = self.list().await?;
        Ok(orders.into_iter().filter(|o| o.email() == email).collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
