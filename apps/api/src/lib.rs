//! # Tally API
//!
//! HTTP server over the spreadsheet store.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          API Server                                     │
//! │                                                                         │
//! │  Browser ──► CorsLayer ──► TraceLayer ──► Router                       │
//! │                                              │                          │
//! │              ┌───────────────────────────────┼──────────────────┐      │
//! │              ▼                               ▼                  ▼      │
//! │  ┌────────────────────┐  ┌────────────────────┐  ┌──────────────────┐  │
//! │  │  routes::account   │  │ routes::orders     │  │ routes::         │  │
//! │  │                    │  │                    │  │   subscription   │  │
//! │  │ • signup           │  │ • rent             │  │ • subscribe      │  │
//! │  │ • login            │  │ • buy              │  │                  │  │
//! │  │ • profile          │  │ • orders           │  │                  │  │
//! │  └────────────────────┘  └────────────────────┘  └──────────────────┘  │
//! │              │                               │                  │      │
//! │              └───────────────┬───────────────┴──────────────────┘      │
//! │                              ▼                                          │
//! │                  Arc<AppState> { store, config }                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `PORT` - Listen port (default: 3000)
//! - `BIND_ADDR` - Listen address (default: 0.0.0.0)
//! - `DATA_DIR` - Directory holding the `.xlsx` tables (default: `.`)
//! - `STORAGE_BACKEND` - `xlsx` or `memory` (default: xlsx)
//! - `CORS_ORIGIN` - Allowed origin, or `*` for any (default: `*`)
//! - `RUST_LOG` - Log filter (default: info)

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::http::header::CONTENT_TYPE;
use axum::http::Method;
use axum::routing::{get, post};
use axum::Router;
use tally_store::Store;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::{ApiConfig, CorsOrigin};

/// Shared application state.
pub struct AppState {
    pub store: Store,
    pub config: ApiConfig,
}

/// Builds the application router with CORS and request tracing.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.cors_origin);

    Router::new()
        .route("/api/signup", post(routes::account::signup))
        .route("/api/login", post(routes::account::login))
        .route("/api/profile", get(routes::account::profile))
        .route("/api/subscribe", post(routes::subscription::subscribe))
        .route("/api/rent", post(routes::orders::rent))
        .route("/api/buy", post(routes::orders::buy))
        .route("/api/orders", get(routes::orders::orders))
        .route("/health", get(routes::health::health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Wildcard origins cannot carry credentials, so only an exact origin
/// turns them on.
fn cors_layer(origin: &CorsOrigin) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    match origin {
        CorsOrigin::Any => cors.allow_origin(Any),
        CorsOrigin::Exact(origin) => cors.allow_origin(origin.clone()).allow_credentials(true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::testing::memory_state;
    use tally_store::{Store, StoreConfig};

    #[tokio::test]
    async fn test_router_builds_for_both_cors_modes() {
        let _any = router(memory_state().await);

        let config = ApiConfig::from_lookup(|key| {
            (key == "CORS_ORIGIN").then(|| "http://localhost:5173".to_string())
        })
        .unwrap();
        let store = Store::open(StoreConfig::in_memory()).await.unwrap();
        let _exact = router(Arc::new(AppState { store, config }));
    }
}
