//! Analysis listing handler

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::error::ApiError;
use crate::middleware::ApiKeyAuth;
use crate::models::{AnalysisListResponse, AnalysisSummary, PaginationParams};
use crate::services::AnalysisStore;

/// Default page size for listings
pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// Upper bound on a single page
pub const MAX_PAGE_SIZE: i64 = 200;

/// GET /analyses - list stored analyses, newest first
pub async fn list_analyses(
    _auth: ApiKeyAuth,
    State(store): State<Arc<AnalysisStore>>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<AnalysisListResponse>, ApiError> {
    let limit = params.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    let offset = params.offset.unwrap_or(0).max(0);

    let records = store.list_all(limit, offset).await?;
    let analyses: Vec<AnalysisSummary> =
        records.into_iter().map(AnalysisSummary::from_record).collect();

    Ok(Json(AnalysisListResponse {
        success: true,
        count: analyses.len(),
        analyses,
    }))
}
