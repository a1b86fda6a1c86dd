//! # Subscription Route
//!
//! Newsletter signup by email.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use tally_core::dto::{MessageResponse, SubscribeRequest};
use tally_store::StoreError;
use tracing::{info, warn};

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// `POST /api/subscribe`
pub async fn subscribe(
    State(state): State<Arc<AppState>>,
    body: Result<Json<SubscribeRequest>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Json(request) = body?;
    let subscription = request
        .validate()
        .map_err(|e| ApiError::invalid(e, "Email is required to subscribe!"))?;

    match state.store.subscriptions().subscribe(&subscription.email).await {
        Ok(_) => {}
        Err(StoreError::UniqueViolation { .. }) => {
            warn!(email = %subscription.email, "Already subscribed");
            return Err(ApiError::conflict("This email is already subscribed!"));
        }
        Err(e) => return Err(e.into()),
    }

    info!(email = %subscription.email, "Subscribed");
    Ok(Json(MessageResponse {
        message: "Subscription successful!".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::routes::testing::memory_state;

    fn body(email: Option<&str>) -> Json<SubscribeRequest> {
        Json(SubscribeRequest {
            email: email.map(str::to_string),
        })
    }

    #[tokio::test]
    async fn test_subscribe_twice() {
        let state = memory_state().await;

        let Json(ok) = subscribe(State(state.clone()), Ok(body(Some("a@x.com"))))
            .await
            .unwrap();
        assert_eq!(ok.message, "Subscription successful!");

        let err = subscribe(State(state), Ok(body(Some("a@x.com"))))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Conflict);
        assert_eq!(err.message, "This email is already subscribed!");
    }

    #[tokio::test]
    async fn test_subscribe_missing_email() {
        let state = memory_state().await;

        let err = subscribe(State(state), Ok(body(None))).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Email is required to subscribe!");
    }

    #[tokio::test]
    async fn test_concurrent_subscribes() {
        let state = memory_state().await;

        let mut handles = Vec::new();
        for _ in 0..8 {
            let state = state.clone();
            handles.push(tokio::spawn(async move {
                subscribe(State(state), Ok(body(Some("same@x.com")))).await
            }));
        }

        let mut succeeded = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                succeeded += 1;
            }
        }

        assert_eq!(succeeded, 1);
        assert_eq!(state.store.subscriptions().list().await.unwrap().len(), 1);
    }
}
