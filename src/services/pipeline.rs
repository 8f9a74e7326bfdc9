//! Transaction pipeline orchestrator
//!
//! Runs one submission through validate → classify → decide → persist and
//! assembles the response. Validation and classification failures are
//! terminal; persistence failures are logged and swallowed so the caller
//! still receives the verdict it paid a remote call for.

use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::models::{RiskVerdict, Transaction};
use crate::services::analysis_store::AnalysisStore;
use crate::services::classifier::RiskClassifier;
use crate::services::notification::{NotificationDecision, NotificationPolicy};
use crate::validation;

/// Response body for an accepted transaction
#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub message: String,
    pub llm_result: RiskVerdict,
}

/// Orchestrates the validation and risk-classification pipeline
pub struct TransactionPipeline {
    classifier: RiskClassifier,
    store: AnalysisStore,
    policy: NotificationPolicy,
}

impl TransactionPipeline {
    pub fn new(
        classifier: RiskClassifier,
        store: AnalysisStore,
        policy: NotificationPolicy,
    ) -> Self {
        Self {
            classifier,
            store,
            policy,
        }
    }

    /// Process one raw transaction payload end to end.
    ///
    /// No remote call or write happens before validation passes, and no
    /// write happens before classification succeeds.
    pub async fn submit(&self, payload: Value) -> Result<SubmissionResponse, ApiError> {
        validation::validate_transaction(&payload)?;

        let transaction: Transaction = serde_json::from_value(payload)
            .map_err(|e| ApiError::Validation(format!("Invalid transaction payload: {}", e)))?;

        tracing::debug!(transaction_id = %transaction.transaction_id, "transaction validated");

        let mut verdict = self.classifier.classify(&transaction).await?;

        let decision = self.policy.decide(&transaction, &verdict);
        match &decision {
            NotificationDecision::Notify(notification) => tracing::info!(
                transaction_id = %transaction.transaction_id,
                alert_type = notification.alert_type.as_str(),
                priority = notification.priority.as_str(),
                "transaction is alert-worthy"
            ),
            NotificationDecision::Skip { reason } => tracing::debug!(
                transaction_id = %transaction.transaction_id,
                reason = %reason,
                "no admin notification"
            ),
        }

        // Best-effort durability: the verdict is already computed, so a
        // storage hiccup must not fail the request.
        match self.store.save(&transaction, &verdict).await {
            Ok(analysis_id) => verdict.analysis_id = Some(analysis_id),
            Err(e) => tracing::error!(
                transaction_id = %transaction.transaction_id,
                error = %e,
                "failed to persist analysis; returning verdict anyway"
            ),
        }

        if let NotificationDecision::Notify(notification) = &decision {
            if let Err(e) = self
                .store
                .record_notification(&transaction, &verdict, notification)
                .await
            {
                tracing::warn!(
                    transaction_id = %transaction.transaction_id,
                    error = %e,
                    "failed to record admin notification"
                );
            }
        }

        Ok(SubmissionResponse {
            message: "Transaction validated and analyzed.".to_string(),
            llm_result: verdict,
        })
    }
}
