//! Route definitions for the fraud analysis API

mod admin;
mod analysis;
mod transaction;

use axum::{routing::get, Router};

pub use admin::admin_routes;
pub use analysis::analysis_routes;
pub use transaction::transaction_routes;

use crate::handlers::health_check;
use crate::middleware;
use crate::state::AppState;

/// Assemble the full application router.
///
/// Used by both `main` and the integration tests, so tests exercise the
/// exact router the server runs, middleware included.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .merge(transaction_routes())
        .merge(analysis_routes())
        .merge(admin_routes())
        .with_state(state)
        .layer(axum::middleware::from_fn(middleware::security_headers))
        .layer(axum::middleware::from_fn(middleware::request_tracing))
}

async fn root() -> &'static str {
    "Transaction Risk Analysis API"
}
