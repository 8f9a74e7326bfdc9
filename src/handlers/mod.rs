//! API handlers for the fraud analysis service

pub mod admin;
pub mod analysis;
pub mod health;
pub mod transaction;

pub use admin::list_admin_notifications;
pub use analysis::list_analyses;
pub use health::health_check;
pub use transaction::create_transaction;
