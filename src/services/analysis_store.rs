//! Persistence gateway for analyses and notifications
//!
//! Wraps the row store behind the handful of operations the pipeline and
//! read endpoints need. Writes are single-row inserts; reads tolerate
//! malformed stored JSON by defaulting the affected fields instead of
//! failing the whole request.

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;

use crate::error::ApiError;
use crate::models::{AdminNotification, AnalysisRecord, RiskVerdict, Transaction};

/// Risk score above which a record counts as high risk
pub const HIGH_RISK_SCORE_THRESHOLD: f64 = 0.7;

/// Marker placed on records whose stored JSON failed to parse
const PARSE_ERROR_MARKER: &str = "Data parsing error";

/// Raw analysis row as stored
#[derive(Debug, sqlx::FromRow)]
struct AnalysisRow {
    id: i64,
    transaction_data: String,
    llm_response: String,
    risk_score: f64,
    recommended_action: String,
    risk_factors: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AnalysisRow {
    /// Decode stored text fields, defaulting anything that no longer
    /// parses and marking the record instead of propagating the failure.
    fn into_record(self) -> AnalysisRecord {
        let transaction_data: Result<Value, _> = serde_json::from_str(&self.transaction_data);
        let llm_response: Result<Value, _> = serde_json::from_str(&self.llm_response);
        let risk_factors: Result<Vec<String>, _> = serde_json::from_str(&self.risk_factors);

        match (transaction_data, llm_response, risk_factors) {
            (Ok(transaction_data), Ok(llm_response), Ok(risk_factors)) => AnalysisRecord {
                id: self.id,
                transaction_data,
                llm_response,
                risk_score: self.risk_score,
                recommended_action: self.recommended_action,
                risk_factors,
                created_at: self.created_at,
                updated_at: self.updated_at,
                error: None,
            },
            _ => {
                tracing::warn!(analysis_id = self.id, "stored analysis contains malformed JSON");
                AnalysisRecord {
                    id: self.id,
                    transaction_data: Value::Object(Default::default()),
                    llm_response: Value::Object(Default::default()),
                    risk_score: self.risk_score,
                    recommended_action: self.recommended_action,
                    risk_factors: vec![],
                    created_at: self.created_at,
                    updated_at: self.updated_at,
                    error: Some(PARSE_ERROR_MARKER.to_string()),
                }
            }
        }
    }
}

/// Gateway over the analysis and notification tables
#[derive(Clone)]
pub struct AnalysisStore {
    db_pool: PgPool,
}

impl AnalysisStore {
    /// Create a new store instance
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    /// Persist a transaction together with its verdict.
    ///
    /// Returns the assigned surrogate key. The insert is a single
    /// statement, so a failure leaves nothing behind.
    pub async fn save(
        &self,
        transaction: &Transaction,
        verdict: &RiskVerdict,
    ) -> Result<i64, ApiError> {
        let transaction_json = serde_json::to_string(transaction)?;
        let verdict_json = serde_json::to_string(verdict)?;
        let factors_json = serde_json::to_string(&verdict.risk_factors)?;
        let now = Utc::now();

        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO transaction_analyses
                (transaction_data, llm_response, risk_score, recommended_action,
                 risk_factors, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&transaction_json)
        .bind(&verdict_json)
        .bind(verdict.risk_score)
        .bind(verdict.recommended_action.as_str())
        .bind(&factors_json)
        .bind(now)
        .bind(now)
        .fetch_one(&self.db_pool)
        .await
        .map_err(|e| ApiError::Database(e.to_string()))?;

        tracing::info!(
            analysis_id = id,
            transaction_id = %transaction.transaction_id,
            "analysis persisted"
        );

        Ok(id)
    }

    /// Fetch a single analysis by surrogate key
    pub async fn get(&self, id: i64) -> Result<Option<AnalysisRecord>, ApiError> {
        let row = sqlx::query_as::<_, AnalysisRow>(
            "SELECT * FROM transaction_analyses WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db_pool)
        .await
        .map_err(|e| ApiError::Database(e.to_string()))?;

        Ok(row.map(AnalysisRow::into_record))
    }

    /// List analyses, newest first
    pub async fn list_all(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AnalysisRecord>, ApiError> {
        let rows = sqlx::query_as::<_, AnalysisRow>(
            r#"
            SELECT * FROM transaction_analyses
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db_pool)
        .await
        .map_err(|e| ApiError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(AnalysisRow::into_record).collect())
    }

    /// List analyses above the high-risk threshold, newest first
    pub async fn list_high_risk(&self) -> Result<Vec<AnalysisRecord>, ApiError> {
        let rows = sqlx::query_as::<_, AnalysisRow>(
            r#"
            SELECT * FROM transaction_analyses
            WHERE risk_score > $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(HIGH_RISK_SCORE_THRESHOLD)
        .fetch_all(&self.db_pool)
        .await
        .map_err(|e| ApiError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(AnalysisRow::into_record).collect())
    }

    /// Record an administrative notification for an alert-worthy
    /// transaction
    pub async fn record_notification(
        &self,
        transaction: &Transaction,
        verdict: &RiskVerdict,
        notification: &AdminNotification,
    ) -> Result<i64, ApiError> {
        let transaction_json = serde_json::to_string(transaction)?;
        let factors_json = serde_json::to_string(&verdict.risk_factors)?;
        let flags_json = serde_json::to_string(&notification.geographic_flags)?;

        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO admin_notifications
                (alert_type, priority, transaction_id, risk_score, risk_factors,
                 geographic_flags, requires_immediate_action, status,
                 transaction_details, llm_analysis, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id
            "#,
        )
        .bind(notification.alert_type.as_str())
        .bind(notification.priority.as_str())
        .bind(&transaction.transaction_id)
        .bind(verdict.risk_score)
        .bind(&factors_json)
        .bind(&flags_json)
        .bind(notification.requires_immediate_action)
        .bind(notification.status.as_str())
        .bind(&transaction_json)
        .bind(&verdict.reasoning)
        .bind(Utc::now())
        .fetch_one(&self.db_pool)
        .await
        .map_err(|e| ApiError::Database(e.to_string()))?;

        tracing::info!(
            notification_id = id,
            alert_type = notification.alert_type.as_str(),
            transaction_id = %transaction.transaction_id,
            "admin notification recorded"
        );

        Ok(id)
    }

    /// Check row store connectivity (for health checks)
    pub async fn is_healthy(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.db_pool).await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(transaction_data: &str, llm_response: &str, risk_factors: &str) -> AnalysisRow {
        AnalysisRow {
            id: 7,
            transaction_data: transaction_data.to_string(),
            llm_response: llm_response.to_string(),
            risk_score: 0.8,
            recommended_action: "block".to_string(),
            risk_factors: risk_factors.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_row_decodes_well_formed_json() {
        let record = row(
            r#"{"transaction_id":"tx_1"}"#,
            r#"{"risk_score":0.8,"recommended_action":"block"}"#,
            r#"["geo mismatch"]"#,
        )
        .into_record();

        assert_eq!(record.id, 7);
        assert!(record.error.is_none());
        assert_eq!(
            record.transaction_data.get("transaction_id").unwrap(),
            "tx_1"
        );
        assert_eq!(record.risk_factors, vec!["geo mismatch"]);
    }

    #[test]
    fn test_row_defaults_malformed_json_instead_of_failing() {
        let record = row("{not json", r#"{"risk_score":0.8}"#, "[]").into_record();

        assert_eq!(record.error.as_deref(), Some(PARSE_ERROR_MARKER));
        assert_eq!(record.transaction_data, Value::Object(Default::default()));
        assert_eq!(record.llm_response, Value::Object(Default::default()));
        assert!(record.risk_factors.is_empty());
        // denormalized columns survive untouched
        assert_eq!(record.risk_score, 0.8);
        assert_eq!(record.recommended_action, "block");
    }

    #[test]
    fn test_row_defaults_malformed_factors_list() {
        let record = row(
            r#"{"transaction_id":"tx_1"}"#,
            r#"{"risk_score":0.8,"recommended_action":"block"}"#,
            "not a list",
        )
        .into_record();

        assert_eq!(record.error.as_deref(), Some(PARSE_ERROR_MARKER));
    }
}
