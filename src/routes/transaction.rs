//! Transaction route definitions

use axum::{routing::post, Router};

use crate::handlers::create_transaction;
use crate::state::AppState;

pub fn transaction_routes() -> Router<AppState> {
    Router::new().route("/transaction", post(create_transaction))
}
