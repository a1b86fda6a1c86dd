//! # Route Handlers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         HTTP Routes                                     │
//! │                                                                         │
//! │  account.rs       POST /api/signup     POST /api/login                  │
//! │                   GET  /api/profile?email=                              │
//! │                                                                         │
//! │  subscription.rs  POST /api/subscribe                                   │
//! │                                                                         │
//! │  orders.rs        POST /api/rent       POST /api/buy                    │
//! │                   GET  /api/orders?email=                               │
//! │                                                                         │
//! │  health.rs        GET  /health                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every handler follows the same steps: parse the body, validate it into
//! a typed row, call one repository, wrap the result in a response DTO.
//! Nothing touches the store until validation has passed.

pub mod account;
pub mod health;
pub mod orders;
pub mod subscription;

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use tally_store::{Store, StoreConfig};

    use crate::config::ApiConfig;
    use crate::AppState;

    /// App state over a fresh in-memory store with default config.
    pub async fn memory_state() -> Arc<AppState> {
        let store = Store::open(StoreConfig::in_memory()).await.unwrap();
        state_with(store)
    }

    pub fn state_with(store: Store) -> Arc<AppState> {
        let config = ApiConfig::from_lookup(|_| None).unwrap();
        Arc::new(AppState { store, config })
    }
}
