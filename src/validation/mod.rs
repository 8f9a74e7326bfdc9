//! Transaction schema validation
//!
//! Validation runs against the raw JSON payload before any
//! deserialization, remote call, or write, so a rejection can name the
//! exact offending field. Checks run in a fixed order and the first
//! failure wins: top-level presence, then nested presence, then the
//! transaction id format rule.

use serde_json::Value;
use thiserror::Error;

use crate::error::ApiError;

/// Prefix every transaction identifier must carry
pub const TRANSACTION_ID_PREFIX: &str = "tx_";

/// The seven top-level fields every transaction must carry, checked in
/// this order
const REQUIRED_FIELDS: [&str; 7] = [
    "transaction_id",
    "timestamp",
    "amount",
    "currency",
    "customer",
    "payment_method",
    "merchant",
];

/// Required sub-fields of each nested object
const NESTED_REQUIRED_FIELDS: [(&str, [&str; 3]); 3] = [
    ("customer", ["id", "country", "ip_address"]),
    ("payment_method", ["type", "last_four", "country_of_issue"]),
    ("merchant", ["id", "name", "category"]),
];

/// Validation failures, in increasing order of how far the payload got
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Transaction payload is required")]
    NullInput,

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("{0}")]
    InvalidFormat(String),
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

/// Validate a raw transaction payload.
///
/// Pure function over its input; reports the first failure encountered.
pub fn validate_transaction(payload: &Value) -> Result<(), ValidationError> {
    if payload.is_null() {
        return Err(ValidationError::NullInput);
    }

    let object = payload.as_object().ok_or_else(|| {
        ValidationError::InvalidFormat("Transaction payload must be a JSON object".to_string())
    })?;

    for field in REQUIRED_FIELDS {
        if !object.contains_key(field) {
            return Err(ValidationError::MissingField(field.to_string()));
        }
    }

    for (parent, children) in NESTED_REQUIRED_FIELDS {
        let nested = match object.get(parent) {
            Some(Value::Object(map)) => map,
            _ => {
                return Err(ValidationError::InvalidFormat(format!(
                    "Field '{}' must be a JSON object",
                    parent
                )))
            }
        };
        for child in children {
            if !nested.contains_key(child) {
                return Err(ValidationError::MissingField(format!(
                    "{}.{}",
                    parent, child
                )));
            }
        }
    }

    match object.get("transaction_id") {
        Some(Value::String(id)) if id.starts_with(TRANSACTION_ID_PREFIX) => Ok(()),
        _ => Err(ValidationError::InvalidFormat(
            "Invalid transaction_id format. Must start with 'tx_'.".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_transaction() -> Value {
        json!({
            "transaction_id": "tx_12345",
            "timestamp": "2025-05-07T14:30:45Z",
            "amount": 999.99,
            "currency": "USD",
            "customer": {
                "id": "cust_98765",
                "country": "US",
                "ip_address": "192.168.1.1"
            },
            "payment_method": {
                "type": "credit_card",
                "last_four": "4242",
                "country_of_issue": "CA"
            },
            "merchant": {
                "id": "merch_12345",
                "name": "Example Store",
                "category": "electronics"
            }
        })
    }

    #[test]
    fn test_valid_transaction_passes() {
        assert_eq!(validate_transaction(&valid_transaction()), Ok(()));
    }

    #[test]
    fn test_null_payload_rejected() {
        assert_eq!(
            validate_transaction(&Value::Null),
            Err(ValidationError::NullInput)
        );
    }

    #[test]
    fn test_non_object_payload_rejected() {
        let err = validate_transaction(&json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat(_)));
    }

    #[test]
    fn test_first_missing_field_is_named() {
        // transaction_id comes before currency in check order
        let err = validate_transaction(&json!({"amount": 100, "currency": "USD"})).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingField("transaction_id".to_string())
        );
        assert!(err.to_string().contains("transaction_id"));
    }

    #[test]
    fn test_each_missing_top_level_field_is_named() {
        for field in REQUIRED_FIELDS {
            let mut payload = valid_transaction();
            payload.as_object_mut().unwrap().remove(field);
            assert_eq!(
                validate_transaction(&payload),
                Err(ValidationError::MissingField(field.to_string())),
                "expected rejection naming '{}'",
                field
            );
        }
    }

    #[test]
    fn test_missing_nested_field_is_named_with_path() {
        let mut payload = valid_transaction();
        payload["customer"].as_object_mut().unwrap().remove("ip_address");
        assert_eq!(
            validate_transaction(&payload),
            Err(ValidationError::MissingField("customer.ip_address".to_string()))
        );

        let mut payload = valid_transaction();
        payload["payment_method"]
            .as_object_mut()
            .unwrap()
            .remove("country_of_issue");
        assert_eq!(
            validate_transaction(&payload),
            Err(ValidationError::MissingField(
                "payment_method.country_of_issue".to_string()
            ))
        );
    }

    #[test]
    fn test_non_object_nested_field_rejected() {
        let mut payload = valid_transaction();
        payload["merchant"] = json!("not an object");
        let err = validate_transaction(&payload).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat(_)));
        assert!(err.to_string().contains("merchant"));
    }

    #[test]
    fn test_bad_transaction_id_prefix_rejected() {
        let mut payload = valid_transaction();
        payload["transaction_id"] = json!("invalid_12345");
        let err = validate_transaction(&payload).unwrap_err();
        assert!(err.to_string().contains("tx_"));
    }

    #[test]
    fn test_non_string_transaction_id_rejected() {
        let mut payload = valid_transaction();
        payload["transaction_id"] = json!(12345);
        let err = validate_transaction(&payload).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat(_)));
    }

    #[test]
    fn test_presence_checks_run_before_format_checks() {
        // Both the prefix rule and a nested field are violated; the
        // presence failure must win.
        let mut payload = valid_transaction();
        payload["transaction_id"] = json!("bogus");
        payload["customer"].as_object_mut().unwrap().remove("country");
        assert_eq!(
            validate_transaction(&payload),
            Err(ValidationError::MissingField("customer.country".to_string()))
        );
    }
}
