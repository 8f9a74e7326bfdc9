//! Data models for the fraud analysis service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An inbound financial transaction, immutable once received.
///
/// Deserialization only happens after the raw payload has passed the
/// schema validator, so every field here is known to be present.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Transaction {
    pub transaction_id: String,
    pub timestamp: String,
    pub amount: f64,
    pub currency: String,
    pub customer: Customer,
    pub payment_method: PaymentMethod,
    pub merchant: Merchant,
}

/// Customer details attached to a transaction
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Customer {
    pub id: String,
    pub country: String,
    pub ip_address: String,
}

/// Payment instrument details
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PaymentMethod {
    #[serde(rename = "type")]
    pub method_type: String,
    pub last_four: String,
    pub country_of_issue: String,
}

/// Merchant details
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Merchant {
    pub id: String,
    pub name: String,
    pub category: String,
}

/// Action recommended by the risk classifier
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecommendedAction {
    Allow,
    Review,
    Block,
}

impl RecommendedAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendedAction::Allow => "allow",
            RecommendedAction::Review => "review",
            RecommendedAction::Block => "block",
        }
    }

    /// Parse the stored wire form back into the enum
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "allow" => Some(RecommendedAction::Allow),
            "review" => Some(RecommendedAction::Review),
            "block" => Some(RecommendedAction::Block),
            _ => None,
        }
    }
}

/// Structured risk assessment returned by the remote classifier.
///
/// `risk_score` and `recommended_action` are mandatory; a response missing
/// either is rejected as malformed before this type is ever constructed.
/// Any extra fields the model volunteers are carried through unchanged.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RiskVerdict {
    /// Fraud likelihood in [0.0, 1.0]
    pub risk_score: f64,

    /// Short labels naming the contributing factors
    #[serde(default)]
    pub risk_factors: Vec<String>,

    /// Free-text explanation of the score
    #[serde(default)]
    pub reasoning: String,

    pub recommended_action: RecommendedAction,

    /// Surrogate key of the persisted analysis, attached after a
    /// successful write
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_id: Option<i64>,

    /// Additional fields supplied by the model, passed through untouched
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// A persisted transaction + verdict pair.
///
/// `transaction_data` and `llm_response` are stored as serialized text;
/// reads that hit malformed stored JSON come back with empty structures
/// and the `error` marker set instead of failing the whole listing.
#[derive(Debug, Serialize, Clone)]
pub struct AnalysisRecord {
    pub id: i64,
    pub transaction_data: Value,
    pub llm_response: Value,
    pub risk_score: f64,
    pub recommended_action: String,
    pub risk_factors: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Condensed analysis row for the listing endpoint
#[derive(Debug, Serialize)]
pub struct AnalysisSummary {
    pub transaction_id: String,
    pub risk_score: f64,
    pub recommended_action: String,
    pub created_at: DateTime<Utc>,
    pub transaction_details: Value,
}

impl AnalysisSummary {
    pub fn from_record(record: AnalysisRecord) -> Self {
        let transaction_id = record
            .transaction_data
            .get("transaction_id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        Self {
            transaction_id,
            risk_score: record.risk_score,
            recommended_action: record.recommended_action,
            created_at: record.created_at,
            transaction_details: record.transaction_data,
        }
    }
}

/// Alert classification assigned to a notification
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    CriticalRiskTransaction,
    HighRiskTransaction,
    MediumRiskTransaction,
    LowRiskTransaction,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::CriticalRiskTransaction => "critical_risk_transaction",
            AlertType::HighRiskTransaction => "high_risk_transaction",
            AlertType::MediumRiskTransaction => "medium_risk_transaction",
            AlertType::LowRiskTransaction => "low_risk_transaction",
        }
    }
}

/// Priority attached to a notification
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AlertPriority {
    Critical,
    High,
    Medium,
    Low,
}

impl AlertPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertPriority::Critical => "critical",
            AlertPriority::High => "high",
            AlertPriority::Medium => "medium",
            AlertPriority::Low => "low",
        }
    }
}

/// Read state of a notification
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    Unread,
    Read,
}

impl NotificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationStatus::Unread => "unread",
            NotificationStatus::Read => "read",
        }
    }
}

/// Human-readable digest of the transaction behind a notification
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TransactionSummary {
    /// Amount formatted with its currency, e.g. "999.99 USD"
    pub amount: String,
    pub customer_country: String,
    pub card_country: String,
    pub merchant_name: String,
    pub merchant_category: String,
    pub payment_type: String,
    pub timestamp: String,
}

impl TransactionSummary {
    pub fn from_transaction(transaction: &Transaction) -> Self {
        Self {
            amount: format!("{:.2} {}", transaction.amount, transaction.currency),
            customer_country: transaction.customer.country.clone(),
            card_country: transaction.payment_method.country_of_issue.clone(),
            merchant_name: transaction.merchant.name.clone(),
            merchant_category: transaction.merchant.category.clone(),
            payment_type: transaction.payment_method.method_type.clone(),
            timestamp: transaction.timestamp.clone(),
        }
    }
}

/// An administrative alert derived from an alert-worthy transaction
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AdminNotification {
    pub alert_type: AlertType,
    pub priority: AlertPriority,
    pub geographic_flags: Vec<String>,
    pub requires_immediate_action: bool,
    pub status: NotificationStatus,
    pub summary: TransactionSummary,
}

/// Notification view returned by the admin listing endpoint
#[derive(Debug, Serialize)]
pub struct NotificationView {
    pub alert_type: AlertType,
    pub transaction_id: String,
    pub risk_score: f64,
    pub risk_factors: Vec<String>,
    pub transaction_details: Value,
    pub llm_analysis: String,
    pub requires_immediate_action: bool,
    pub created_at: DateTime<Utc>,
}

/// Pagination parameters shared by the listing endpoints
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Response body for GET /analyses
#[derive(Debug, Serialize)]
pub struct AnalysisListResponse {
    pub success: bool,
    pub analyses: Vec<AnalysisSummary>,
    pub count: usize,
}

/// Response body for GET /admin/notifications
#[derive(Debug, Serialize)]
pub struct NotificationListResponse {
    pub success: bool,
    pub notifications: Vec<NotificationView>,
    pub count: usize,
}
