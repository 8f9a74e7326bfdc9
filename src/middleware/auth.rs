//! API key authentication
//!
//! Every business endpoint requires the shared secret in the `X-API-KEY`
//! header. A missing key is 401, a wrong key is 403, and either
//! short-circuits before any other processing.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use std::sync::Arc;

use crate::config::Config;
use crate::error::ApiError;

/// Header carrying the shared secret
pub const API_KEY_HEADER: &str = "X-API-KEY";

/// Extractor proving the request carried a valid API key.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(_auth: ApiKeyAuth) -> impl IntoResponse {
///     "only reachable with a valid key"
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ApiKeyAuth;

#[async_trait]
impl<S> FromRequestParts<S> for ApiKeyAuth
where
    Arc<Config>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = Arc::<Config>::from_ref(state);

        let provided = parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|value| value.to_str().ok());

        match provided {
            None => Err(ApiError::Unauthorized("API key required".to_string())),
            Some(key) if key != config.api_secret => {
                Err(ApiError::Forbidden("Invalid API key".to_string()))
            }
            Some(_) => Ok(ApiKeyAuth),
        }
    }
}
