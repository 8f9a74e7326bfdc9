//! Middleware: API key authentication, request tracing, security headers

pub mod auth;
mod security;
mod tracing;

pub use auth::ApiKeyAuth;
pub use security::security_headers;
pub use tracing::request_tracing;
