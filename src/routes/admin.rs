//! Admin route definitions

use axum::{routing::get, Router};

use crate::handlers::list_admin_notifications;
use crate::state::AppState;

pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/admin/notifications", get(list_admin_notifications))
}
