//! Admin notification listing handler

use axum::{
    extract::{Query, State},
    Json,
};
use serde_json::Value;
use std::sync::Arc;

use crate::error::ApiError;
use crate::handlers::analysis::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::middleware::ApiKeyAuth;
use crate::models::{
    AnalysisRecord, NotificationListResponse, NotificationView, PaginationParams,
    RecommendedAction,
};
use crate::services::notification::classify_alert;
use crate::services::AnalysisStore;

/// GET /admin/notifications - alert views derived from high-risk analyses.
///
/// Records whose stored JSON no longer parses are skipped rather than
/// aborting the listing.
pub async fn list_admin_notifications(
    _auth: ApiKeyAuth,
    State(store): State<Arc<AnalysisStore>>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<NotificationListResponse>, ApiError> {
    let limit = params.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    let offset = params.offset.unwrap_or(0).max(0);

    let records = store.list_high_risk().await?;

    let notifications: Vec<NotificationView> = records
        .into_iter()
        .filter(|record| record.error.is_none())
        .skip(offset as usize)
        .take(limit as usize)
        .map(build_view)
        .collect();

    Ok(Json(NotificationListResponse {
        success: true,
        count: notifications.len(),
        notifications,
    }))
}

/// Shape one high-risk record into the admin view, re-deriving the alert
/// classification from the denormalized verdict fields.
fn build_view(record: AnalysisRecord) -> NotificationView {
    let action =
        RecommendedAction::parse(&record.recommended_action).unwrap_or(RecommendedAction::Review);
    let (alert_type, _priority) = classify_alert(record.risk_score, action);

    let transaction_id = record
        .transaction_data
        .get("transaction_id")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let llm_analysis = record
        .llm_response
        .get("reasoning")
        .and_then(Value::as_str)
        .unwrap_or("N/A")
        .to_string();

    NotificationView {
        alert_type,
        transaction_id,
        risk_score: record.risk_score,
        risk_factors: record.risk_factors,
        transaction_details: record.transaction_data,
        llm_analysis,
        requires_immediate_action: matches!(action, RecommendedAction::Block),
        created_at: record.created_at,
    }
}
