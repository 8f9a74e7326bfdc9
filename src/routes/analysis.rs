//! Analysis route definitions

use axum::{routing::get, Router};

use crate::handlers::list_analyses;
use crate::state::AppState;

pub fn analysis_routes() -> Router<AppState> {
    Router::new().route("/analyses", get(list_analyses))
}
