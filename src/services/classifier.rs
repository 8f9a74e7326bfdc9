//! Risk classifier client
//!
//! Sends a transaction to the remote LLM risk-scoring endpoint and parses
//! its structured verdict. The client is a pure remote call: persistence
//! is the orchestrator's job, never a side effect of classification.

use serde::Deserialize;
use thiserror::Error;

use crate::config::Config;
use crate::error::ApiError;
use crate::models::{RiskVerdict, Transaction};

/// Prompt handed to the risk model. `{transaction_data}` is replaced with
/// the serialized transaction before sending.
const RISK_PROMPT_TEMPLATE: &str = r#"# Transaction Risk Analysis

## System Instructions
You are a specialised financial risk analyst. Your task is to evaluate
transaction data and determine a risk score from 0.0 (no risk) to 1.0
(extremely high risk) based on patterns and indicators of potential fraud.
You must also provide clear reasoning for your risk assessment.

## Response Format
Respond in JSON format with the following structure:

{
  "risk_score": 0.0-1.0,
  "risk_factors": ["factor1", "factor2"],
  "reasoning": "A brief explanation of your analysis",
  "recommended_action": "allow|review|block"
}

## Risk Factors to Consider
1. Geographic anomalies: customer country differing from the payment
   method country, transactions from high-risk jurisdictions, IP address
   location inconsistent with the customer's country.
2. Transaction patterns: unusual amounts for the merchant category,
   activity outside normal business hours, multiple transactions in short
   succession.
3. Payment method indicators: payment method type and associated risks,
   recently added payment methods.
4. Merchant factors: merchant category and typical fraud rates, merchant
   history and reputation.

## Additional Guidelines
- Assign higher risk scores to combinations of multiple risk factors.
- Higher amounts generally warrant more scrutiny.
- Account for normal cross-border shopping patterns while flagging
  unusual combinations.
- Provide actionable reasoning that explains the score.
- Recommend "allow" for scores 0.0-0.3, "review" for scores 0.3-0.7, and
  "block" for scores 0.7-1.0.

## Transaction Data
{transaction_data}
"#;

/// Classification failures
#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("risk service request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("risk service returned HTTP {status}: {body}")]
    RemoteStatus { status: u16, body: String },

    #[error("malformed risk verdict: {0}")]
    MalformedResponse(String),
}

impl From<ClassifierError> for ApiError {
    fn from(err: ClassifierError) -> Self {
        ApiError::ExternalService(err.to_string())
    }
}

/// Chat-completions response envelope (OpenAI wire format)
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: String,
}

/// Client for the remote LLM risk-scoring endpoint
pub struct RiskClassifier {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl RiskClassifier {
    /// Create a classifier from application configuration
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: config.llm_api_url.clone(),
            api_key: config.llm_api_key.clone(),
            model: config.llm_model.clone(),
        }
    }

    /// Obtain a risk verdict for a validated transaction.
    ///
    /// Every failure is terminal for the request; there is no retry.
    pub async fn classify(&self, transaction: &Transaction) -> Result<RiskVerdict, ClassifierError> {
        let prompt = render_prompt(transaction)
            .map_err(|e| ClassifierError::MalformedResponse(e.to_string()))?;

        let body = serde_json::json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
        });

        tracing::debug!(
            transaction_id = %transaction.transaction_id,
            model = %self.model,
            "requesting risk classification"
        );

        let response = self
            .http
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClassifierError::RemoteStatus {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: ChatCompletionResponse = response.json().await.map_err(|e| {
            ClassifierError::MalformedResponse(format!("response body is not valid JSON: {}", e))
        })?;

        let choice = envelope.choices.into_iter().next().ok_or_else(|| {
            ClassifierError::MalformedResponse("'choices' missing or empty".to_string())
        })?;

        let verdict = parse_verdict(&choice.message.content)?;

        tracing::info!(
            transaction_id = %transaction.transaction_id,
            risk_score = verdict.risk_score,
            recommended_action = verdict.recommended_action.as_str(),
            "transaction classified"
        );

        Ok(verdict)
    }
}

/// Substitute the serialized transaction into the prompt template
fn render_prompt(transaction: &Transaction) -> Result<String, serde_json::Error> {
    let transaction_json = serde_json::to_string_pretty(transaction)?;
    Ok(RISK_PROMPT_TEMPLATE.replace("{transaction_data}", &transaction_json))
}

/// Parse the model's raw completion text into a verdict.
///
/// Tolerates code-fenced output; rejects anything missing `risk_score` or
/// `recommended_action`.
fn parse_verdict(raw: &str) -> Result<RiskVerdict, ClassifierError> {
    let text = strip_code_fences(raw);
    if text.is_empty() {
        return Err(ClassifierError::MalformedResponse(
            "empty completion text".to_string(),
        ));
    }

    let value: serde_json::Value = serde_json::from_str(text).map_err(|e| {
        ClassifierError::MalformedResponse(format!("completion text is not valid JSON: {}", e))
    })?;

    if value.get("risk_score").is_none() || value.get("recommended_action").is_none() {
        return Err(ClassifierError::MalformedResponse(
            "missing risk_score or recommended_action".to_string(),
        ));
    }

    serde_json::from_value(value)
        .map_err(|e| ClassifierError::MalformedResponse(format!("invalid verdict shape: {}", e)))
}

/// Strip a surrounding markdown code fence (with optional `json` tag)
fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix("```") {
        text = rest.strip_prefix("json").unwrap_or(rest);
        if let Some(rest) = text.strip_suffix("```") {
            text = rest;
        }
    }
    text.trim()
}
