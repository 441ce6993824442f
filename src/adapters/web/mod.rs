//! HTTP/JSON adapter over the ledger.
//!
//! One `LedgerStore` behind a mutex; every handler locks it for the length
//! of a single operation, so requests apply strictly one after another.

mod error;
mod handlers;

pub use error::WebError;
pub use handlers::*;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::{Arc, Mutex, MutexGuard};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::domain::ledger_store::LedgerStore;
use crate::ports::link_port::LinkProviderPort;

pub struct AppState {
    pub ledger: Mutex<LedgerStore>,
    pub link_provider: Arc<dyn LinkProviderPort + Send + Sync>,
}

impl AppState {
    pub fn new(ledger: LedgerStore, link_provider: Arc<dyn LinkProviderPort + Send + Sync>) -> Self {
        Self {
            ledger: Mutex::new(ledger),
            link_provider,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, LedgerStore>, WebError> {
        self.ledger
            .lock()
            .map_err(|_| WebError::internal("ledger lock poisoned"))
    }
}

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(handlers::health))
        .route("/state", get(handlers::get_state))
        .route("/accounts", get(handlers::list_accounts))
        .route("/transactions", get(handlers::list_transactions))
        .route("/budgets", get(handlers::list_budgets))
        .route("/billers", get(handlers::list_billers))
        .route("/bills", get(handlers::list_bills))
        .route("/insights", get(handlers::list_insights))
        .route("/profile", get(handlers::get_profile))
        .route("/transaction", post(handlers::add_transaction))
        .route("/bill/pay", post(handlers::pay_bill))
        .route("/insight", post(handlers::add_insight))
        .route("/transfer", post(handlers::transfer_funds))
        .route("/create_link_token", post(handlers::create_link_token))
        .route("/set_access_token", post(handlers::set_access_token));

    Router::new()
        .nest("/api", api)
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}
