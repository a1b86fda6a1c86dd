//! # Health Route
//!
//! `GET /health` answers `OK` while every table can be read, and 503
//! otherwise.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use tracing::warn;

use crate::AppState;

/// Health check endpoint.
pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, &'static str) {
    if state.store.health_check().await {
        (StatusCode::OK, "OK")
    } else {
        warn!("Health check failed: a table could not be read");
        (StatusCode::SERVICE_UNAVAILABLE, "Storage unavailable")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::testing::{memory_state, state_with};
    use tally_core::Resource;
    use tally_store::{Store, StoreConfig};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_healthy_store() {
        let state = memory_state().await;
        assert_eq!(health(State(state)).await, (StatusCode::OK, "OK"));
    }

    #[tokio::test]
    async fn test_unreadable_table_is_503() {
        let dir = TempDir::new().unwrap();
        let config = StoreConfig::new(dir.path());
        let store = Store::open(config.clone()).await.unwrap();
        std::fs::write(config.table_path(Resource::Rentals), b"not a workbook").unwrap();

        let (status, _) = health(State(state_with(store))).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
