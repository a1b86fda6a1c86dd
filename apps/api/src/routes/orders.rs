//! # Order Routes
//!
//! Rental and purchase requests, and the per-customer order listing.
//!
//! ## Orders Lookup
//! ```text
//! GET /api/orders?email=a@x.com
//!      │
//!      ├── rentals.xlsx   ──filter email──► rentals:   [..]
//!      └── purchases.xlsx ──filter email──► purchases: [..]
//! ```
//!
//! Both lists are always present; a customer with no orders gets two
//! empty arrays, not a 404.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use tally_core::dto::{BuyRequest, BuyResponse, EmailQuery, OrdersResponse, RentRequest, RentResponse};
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

const FIELDS_REQUIRED: &str = "All fields are required!";

/// `POST /api/rent`
pub async fn rent(
    State(state): State<Arc<AppState>>,
    body: Result<Json<RentRequest>, JsonRejection>,
) -> ApiResult<Json<RentResponse>> {
    let Json(request) = body?;
    let rental = request
        .validate()
        .map_err(|e| ApiError::invalid(e, FIELDS_REQUIRED))?;

    state.store.rentals().create(&rental).await?;

    info!(email = %rental.email, category = %rental.category, "Rental submitted");
    Ok(Json(RentResponse {
        message: "Rental request submitted successfully!".to_string(),
        rental,
    }))
}

/// `POST /api/buy`
pub async fn buy(
    State(state): State<Arc<AppState>>,
    body: Result<Json<BuyRequest>, JsonRejection>,
) -> ApiResult<Json<BuyResponse>> {
    let Json(request) = body?;
    let purchase = request
        .validate()
        .map_err(|e| ApiError::invalid(e, FIELDS_REQUIRED))?;

    state.store.purchases().create(&purchase).await?;

    info!(email = %purchase.email, category = %purchase.category, "Purchase submitted");
    Ok(Json(BuyResponse {
        message: "Purchase submitted successfully!".to_string(),
        purchase,
    }))
}

/// `GET /api/orders?email=`
pub async fn orders(
    State(state): State<Arc<AppState>>,
    query: Result<Query<EmailQuery>, QueryRejection>,
) -> ApiResult<Json<OrdersResponse>> {
    let Query(query) = query?;
    let email = query
        .validate()
        .map_err(|e| ApiError::invalid(e, "Email is required!"))?;

    let rentals = state.store.rentals().list_by_email(&email).await?;
    let purchases = state.store.purchases().list_by_email(&email).await?;

    Ok(Json(OrdersResponse { rentals, purchases }))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::routes::testing::{memory_state, state_with};
    use tally_store::{MemoryTable, Store, StoreConfig, TableStore};
    use tempfile::TempDir;

    fn rent_body(name: &str, email: &str) -> Json<RentRequest> {
        Json(RentRequest {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            phone: Some("555".to_string()),
            category: Some("bikes".to_string()),
            duration: Some("3".to_string()),
        })
    }

    fn buy_body(name: &str, email: &str) -> Json<BuyRequest> {
        Json(BuyRequest {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            phone: Some("555".to_string()),
            category: Some("tents".to_string()),
            quantity: Some("1".to_string()),
        })
    }

    fn email_query(email: &str) -> Query<EmailQuery> {
        Query(EmailQuery {
            email: Some(email.to_string()),
        })
    }

    #[tokio::test]
    async fn test_rent_and_buy() {
        let state = memory_state().await;

        let Json(rented) = rent(State(state.clone()), Ok(rent_body("Ann", "a@x.com")))
            .await
            .unwrap();
        assert_eq!(rented.message, "Rental request submitted successfully!");
        assert_eq!(rented.rental.duration, "3");

        let Json(bought) = buy(State(state), Ok(buy_body("Ann", "a@x.com")))
            .await
            .unwrap();
        assert_eq!(bought.message, "Purchase submitted successfully!");
        assert_eq!(bought.purchase.quantity, "1");
    }

    #[tokio::test]
    async fn test_orders_filter_by_email() {
        let state = memory_state().await;
        let _ = rent(State(state.clone()), Ok(rent_body("Ann", "a@x.com")))
            .await
            .unwrap();
        let _ = rent(State(state.clone()), Ok(rent_body("Ben", "b@x.com")))
            .await
            .unwrap();
        let _ = buy(State(state.clone()), Ok(buy_body("Ben", "b@x.com")))
            .await
            .unwrap();

        let Json(mine) = orders(State(state.clone()), Ok(email_query("a@x.com")))
            .await
            .unwrap();
        assert_eq!(mine.rentals.len(), 1);
        assert_eq!(mine.rentals[0].name, "Ann");
        assert!(mine.purchases.is_empty());

        let Json(nobody) = orders(State(state), Ok(email_query("c@x.com")))
            .await
            .unwrap();
        assert!(nobody.rentals.is_empty());
        assert!(nobody.purchases.is_empty());
    }

    #[tokio::test]
    async fn test_orders_missing_email() {
        let state = memory_state().await;

        let err = orders(State(state), Ok(Query(EmailQuery::default())))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Email is required!");
    }

    #[tokio::test]
    async fn test_missing_field_never_writes() {
        let mut tables: Vec<Arc<MemoryTable>> = Vec::new();
        let store = Store::with_backend(|resource| {
            let table = Arc::new(MemoryTable::new(resource.name()));
            tables.push(table.clone());
            table as Arc<dyn TableStore>
        });
        store.initialize().await.unwrap();
        let state = state_with(store);

        let mut rental = rent_body("Ann", "a@x.com");
        rental.0.phone = None;
        let err = rent(State(state.clone()), Ok(rental)).await.unwrap_err();
        assert_eq!(err.message, "All fields are required!");

        let mut purchase = buy_body("Ann", "a@x.com");
        purchase.0.quantity = Some(String::new());
        let err = buy(State(state), Ok(purchase)).await.unwrap_err();
        assert_eq!(err.message, "All fields are required!");

        for table in &tables {
            assert_eq!(table.write_count().await, 0);
        }
    }

    #[tokio::test]
    async fn test_zero_quantity_is_missing() {
        let state = memory_state().await;
        let body = Json::<BuyRequest>::from_bytes(
            br#"{"name":"Ann","email":"a@x.com","phone":"555","category":"tents","quantity":0}"#,
        );

        let err = buy(State(state.clone()), body).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "All fields are required!");
        assert!(state.store.purchases().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_oversized_field_is_400_not_storage_failure() {
        let dir = TempDir::new().unwrap();
        let store = Store::open(StoreConfig::new(dir.path())).await.unwrap();
        let state = state_with(store);

        let err = rent(State(state.clone()), Ok(rent_body(&"x".repeat(40_000), "a@x.com")))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "name must be at most 32767 characters");
        assert!(state.store.rentals().list().await.unwrap().is_empty());
    }
}
