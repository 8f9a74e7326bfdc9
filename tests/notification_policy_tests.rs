//! Notification policy tests
//!
//! These pin down the alert-worthiness partition, the classification
//! tie-break order, and the immediate-action rule.

use fraudwatch_server::models::{
    AlertPriority, AlertType, Customer, Merchant, PaymentMethod, RecommendedAction, RiskVerdict,
    Transaction,
};
use fraudwatch_server::services::notification::{
    classify_alert, NotificationDecision, NotificationPolicy,
};

fn transaction(amount: f64) -> Transaction {
    Transaction {
        transaction_id: "tx_1".to_string(),
        timestamp: "2025-01-01T00:00:00Z".to_string(),
        amount,
        currency: "USD".to_string(),
        customer: Customer {
            id: "c1".to_string(),
            country: "US".to_string(),
            ip_address: "1.2.3.4".to_string(),
        },
        payment_method: PaymentMethod {
            method_type: "credit_card".to_string(),
            last_four: "4242".to_string(),
            country_of_issue: "US".to_string(),
        },
        merchant: Merchant {
            id: "m1".to_string(),
            name: "Shop".to_string(),
            category: "retail".to_string(),
        },
    }
}

fn verdict(risk_score: f64, action: RecommendedAction) -> RiskVerdict {
    RiskVerdict {
        risk_score,
        risk_factors: vec![],
        reasoning: String::new(),
        recommended_action: action,
        analysis_id: None,
        extra: serde_json::Map::new(),
    }
}

// ============================================================================
// Alert-Worthiness Partition
// ============================================================================

#[test]
fn test_notify_partition_is_exhaustive() {
    use RecommendedAction::*;

    // (score, action, amount, expected alert-worthy)
    let cases = [
        // high score alone
        (0.7, Allow, 50.0, true),
        (0.95, Allow, 50.0, true),
        (0.69, Allow, 50.0, false),
        // attention-demanding actions alone
        (0.1, Block, 50.0, true),
        (0.1, Review, 50.0, true),
        (0.1, Allow, 50.0, false),
        // elevated score plus large amount
        (0.5, Allow, 5000.01, true),
        (0.69, Allow, 1_000_000.0, true),
        (0.5, Allow, 5000.0, false),
        (0.49, Allow, 1_000_000.0, false),
        // quiet transactions
        (0.0, Allow, 0.0, false),
        (0.3, Allow, 4999.0, false),
    ];

    let policy = NotificationPolicy::new(vec![]);
    for (score, action, amount, expected) in cases {
        let decision = policy.decide(&transaction(amount), &verdict(score, action));
        assert_eq!(
            decision.is_notify(),
            expected,
            "score={} action={:?} amount={}",
            score,
            action,
            amount
        );
        // every verdict falls into exactly one of notify / skip
        match decision {
            NotificationDecision::Notify(_) => assert!(expected),
            NotificationDecision::Skip { reason } => {
                assert!(!expected);
                assert!(!reason.is_empty());
            }
        }
    }
}

// ============================================================================
// Classification Tie-Break
// ============================================================================

#[test]
fn test_score_test_takes_precedence_over_action() {
    // 0.85 with review is critical, not high
    let (alert_type, priority) = classify_alert(0.85, RecommendedAction::Review);
    assert_eq!(alert_type, AlertType::CriticalRiskTransaction);
    assert_eq!(priority, AlertPriority::Critical);
}

#[test]
fn test_classification_bands() {
    use RecommendedAction::*;

    let cases = [
        (0.8, Allow, AlertType::CriticalRiskTransaction),
        (0.2, Block, AlertType::CriticalRiskTransaction),
        (0.79, Allow, AlertType::HighRiskTransaction),
        (0.7, Allow, AlertType::HighRiskTransaction),
        (0.2, Review, AlertType::HighRiskTransaction),
        (0.69, Allow, AlertType::MediumRiskTransaction),
        (0.5, Allow, AlertType::MediumRiskTransaction),
        (0.49, Allow, AlertType::LowRiskTransaction),
        (0.0, Allow, AlertType::LowRiskTransaction),
    ];

    for (score, action, expected) in cases {
        let (alert_type, _) = classify_alert(score, action);
        assert_eq!(alert_type, expected, "score={} action={:?}", score, action);
    }
}

#[test]
fn test_priority_tracks_alert_type() {
    assert_eq!(
        classify_alert(0.9, RecommendedAction::Block).1,
        AlertPriority::Critical
    );
    assert_eq!(
        classify_alert(0.75, RecommendedAction::Allow).1,
        AlertPriority::High
    );
    assert_eq!(
        classify_alert(0.6, RecommendedAction::Allow).1,
        AlertPriority::Medium
    );
    assert_eq!(
        classify_alert(0.1, RecommendedAction::Allow).1,
        AlertPriority::Low
    );
}

// ============================================================================
// Immediate Action Rule
// ============================================================================

#[test]
fn test_requires_immediate_action_only_for_block() {
    let policy = NotificationPolicy::new(vec![]);

    let cases = [
        (RecommendedAction::Block, true),
        (RecommendedAction::Review, false),
        (RecommendedAction::Allow, false),
    ];

    for (action, expected) in cases {
        // score 0.9 so every case is alert-worthy
        match policy.decide(&transaction(50.0), &verdict(0.9, action)) {
            NotificationDecision::Notify(notification) => assert_eq!(
                notification.requires_immediate_action, expected,
                "action={:?}",
                action
            ),
            NotificationDecision::Skip { .. } => panic!("expected notification for {:?}", action),
        }
    }
}

// ============================================================================
// Summary and Flags
// ============================================================================

#[test]
fn test_notification_carries_transaction_summary() {
    let policy = NotificationPolicy::new(vec![]);
    let mut tx = transaction(50_000.0);
    tx.payment_method.country_of_issue = "NG".to_string();

    match policy.decide(&tx, &verdict(0.8, RecommendedAction::Block)) {
        NotificationDecision::Notify(notification) => {
            assert_eq!(notification.summary.amount, "50000.00 USD");
            assert_eq!(notification.summary.merchant_name, "Shop");
            assert_eq!(notification.summary.merchant_category, "retail");
            assert_eq!(notification.summary.payment_type, "credit_card");
            assert!(notification.geographic_flags[0].contains("Cross-border"));
        }
        NotificationDecision::Skip { .. } => panic!("expected notification"),
    }
}

#[test]
fn test_high_risk_country_list_is_injected_config() {
    let flagged = NotificationPolicy::new(vec!["IR".to_string()]);
    let unflagged = NotificationPolicy::new(vec![]);

    let mut tx = transaction(50.0);
    tx.customer.country = "IR".to_string();
    let verdict = verdict(0.9, RecommendedAction::Block);

    let flags_with = match flagged.decide(&tx, &verdict) {
        NotificationDecision::Notify(n) => n.geographic_flags,
        NotificationDecision::Skip { .. } => panic!("expected notification"),
    };
    let flags_without = match unflagged.decide(&tx, &verdict) {
        NotificationDecision::Notify(n) => n.geographic_flags,
        NotificationDecision::Skip { .. } => panic!("expected notification"),
    };

    assert!(flags_with.iter().any(|f| f.contains("high-risk country list")));
    assert!(!flags_without.iter().any(|f| f.contains("high-risk country list")));
}
