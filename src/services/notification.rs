//! Notification policy
//!
//! Pure decision logic mapping a risk verdict (plus its transaction) to an
//! administrative notification. Never fails and never touches the outside
//! world; the orchestrator decides what to do with the decision.

use crate::models::{
    AdminNotification, AlertPriority, AlertType, NotificationStatus, RecommendedAction,
    RiskVerdict, Transaction, TransactionSummary,
};

// ============================================================================
// Policy Thresholds
// ============================================================================

/// Score at or above which a transaction is always alert-worthy
pub const NOTIFY_SCORE_THRESHOLD: f64 = 0.7;

/// Score at or above which an alert is classified critical
pub const CRITICAL_SCORE_THRESHOLD: f64 = 0.8;

/// Score at or above which a large transaction becomes alert-worthy
pub const ELEVATED_SCORE_THRESHOLD: f64 = 0.5;

/// Amount above which an elevated score triggers an alert
pub const ELEVATED_AMOUNT_THRESHOLD: f64 = 5000.0;

/// Outcome of the notification policy for one transaction
#[derive(Debug, Clone, PartialEq)]
pub enum NotificationDecision {
    /// Create the given notification
    Notify(AdminNotification),

    /// No notification; the reason is kept for the response/logs
    Skip { reason: String },
}

impl NotificationDecision {
    pub fn is_notify(&self) -> bool {
        matches!(self, NotificationDecision::Notify(_))
    }
}

/// Classify an alert-worthy verdict into an alert type and priority.
///
/// The tie-break order is fixed: the critical tests run before the high
/// tests, which run before the medium test. A score of 0.85 with a
/// `review` action is therefore critical, not high.
pub fn classify_alert(risk_score: f64, action: RecommendedAction) -> (AlertType, AlertPriority) {
    if risk_score >= CRITICAL_SCORE_THRESHOLD || matches!(action, RecommendedAction::Block) {
        (AlertType::CriticalRiskTransaction, AlertPriority::Critical)
    } else if risk_score >= NOTIFY_SCORE_THRESHOLD || matches!(action, RecommendedAction::Review) {
        (AlertType::HighRiskTransaction, AlertPriority::High)
    } else if risk_score >= ELEVATED_SCORE_THRESHOLD {
        (AlertType::MediumRiskTransaction, AlertPriority::Medium)
    } else {
        (AlertType::LowRiskTransaction, AlertPriority::Low)
    }
}

/// Notification policy with its injected configuration
#[derive(Debug, Clone)]
pub struct NotificationPolicy {
    high_risk_countries: Vec<String>,
}

impl NotificationPolicy {
    /// Create a policy with the configured high-risk country list
    pub fn new(high_risk_countries: Vec<String>) -> Self {
        Self { high_risk_countries }
    }

    /// Whether a classified transaction warrants an administrative alert.
    ///
    /// The three criteria form an exhaustive partition with their
    /// negation: every verdict is either alert-worthy or not.
    pub fn should_notify(&self, transaction: &Transaction, verdict: &RiskVerdict) -> bool {
        let action_demands_attention = matches!(
            verdict.recommended_action,
            RecommendedAction::Block | RecommendedAction::Review
        );

        verdict.risk_score >= NOTIFY_SCORE_THRESHOLD
            || action_demands_attention
            || (verdict.risk_score >= ELEVATED_SCORE_THRESHOLD
                && transaction.amount > ELEVATED_AMOUNT_THRESHOLD)
    }

    /// Map a transaction and its verdict to a notification decision
    pub fn decide(&self, transaction: &Transaction, verdict: &RiskVerdict) -> NotificationDecision {
        if !self.should_notify(transaction, verdict) {
            return NotificationDecision::Skip {
                reason: "Transaction does not meet notification criteria".to_string(),
            };
        }

        let (alert_type, priority) = classify_alert(verdict.risk_score, verdict.recommended_action);

        NotificationDecision::Notify(AdminNotification {
            alert_type,
            priority,
            geographic_flags: self.geographic_flags(transaction),
            requires_immediate_action: matches!(
                verdict.recommended_action,
                RecommendedAction::Block
            ),
            status: NotificationStatus::Unread,
            summary: TransactionSummary::from_transaction(transaction),
        })
    }

    /// Derive cross-border and high-risk-country indicators
    fn geographic_flags(&self, transaction: &Transaction) -> Vec<String> {
        let mut flags = Vec::new();
        let customer_country = transaction.customer.country.as_str();
        let card_country = transaction.payment_method.country_of_issue.as_str();

        if !customer_country.is_empty()
            && !card_country.is_empty()
            && customer_country != card_country
        {
            flags.push(format!(
                "Cross-border: customer in {}, card issued in {}",
                customer_country, card_country
            ));
        }

        if self.is_high_risk(customer_country) {
            flags.push(format!("{} is on the high-risk country list", customer_country));
        }
        if card_country != customer_country && self.is_high_risk(card_country) {
            flags.push(format!("{} is on the high-risk country list", card_country));
        }

        flags
    }

    fn is_high_risk(&self, country: &str) -> bool {
        !country.is_empty()
            && self
                .high_risk_countries
                .iter()
                .any(|entry| entry.eq_ignore_ascii_case(country))
    }
}
