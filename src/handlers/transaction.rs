//! Transaction submission handler

use axum::{extract::State, http::StatusCode, Json};
use serde_json::Value;
use std::sync::Arc;

use crate::error::ApiError;
use crate::middleware::ApiKeyAuth;
use crate::services::pipeline::{SubmissionResponse, TransactionPipeline};

/// POST /transaction - validate, classify, and persist a transaction
pub async fn create_transaction(
    _auth: ApiKeyAuth,
    State(pipeline): State<Arc<TransactionPipeline>>,
    payload: Option<Json<Value>>,
) -> Result<(StatusCode, Json<SubmissionResponse>), ApiError> {
    // An absent or unreadable body is validated as a null payload so the
    // caller gets the same 422 shape as any other schema failure.
    let payload = payload.map(|Json(value)| value).unwrap_or(Value::Null);

    let response = pipeline.submit(payload).await?;

    Ok((StatusCode::CREATED, Json(response)))
}
