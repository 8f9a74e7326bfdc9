//! Request tracing middleware

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// Log every request with its method, path, status, and latency. The log
/// level follows the response class so server faults stand out.
pub async fn request_tracing(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let start = Instant::now();
    let response = next.run(request).await;
    let latency_ms = start.elapsed().as_millis();

    let status = response.status().as_u16();
    if response.status().is_server_error() {
        tracing::error!(method = %method, path = %path, status, latency_ms = %latency_ms, "request failed");
    } else if response.status().is_client_error() {
        tracing::warn!(method = %method, path = %path, status, latency_ms = %latency_ms, "request rejected");
    } else {
        tracing::info!(method = %method, path = %path, status, latency_ms = %latency_ms, "request handled");
    }

    response
}
