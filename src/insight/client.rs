//! Insight gateway client implementation.

use crate::error::{FluxoError, FluxoResult};
use crate::types::CashflowRecord;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

pub const DEFAULT_API_URL: &str = "https://ai.gateway.lovable.dev/v1";
pub const DEFAULT_MODEL: &str = "google/gemini-2.5-flash";

const SYSTEM_PROMPT: &str = "You are an experienced financial analyst specialized in \
cash-flow analysis. Provide clear, practical, data-driven insights.";

/// Client for the hosted insight gateway.
///
/// The gateway is an opaque collaborator: one request per analysis, no
/// retries, no streaming.
pub struct InsightClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

impl InsightClient {
    pub fn new(api_url: String, api_key: String, model: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url,
            api_key,
            model,
        }
    }

    /// Request a narrative analysis of the extracted series.
    pub async fn analyze(
        &self,
        records: &[CashflowRecord],
        file_name: &str,
    ) -> FluxoResult<String> {
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": build_prompt(records, file_name)? },
            ],
        });

        let url = format!("{}/chat/completions", self.api_url.trim_end_matches('/'));
        info!(model = %self.model, months = records.len(), "requesting cash-flow insights");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| FluxoError::Insight(format!("gateway request failed: {e}")))?;

        if let Some(err) = map_status(response.status()) {
            return Err(err);
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| FluxoError::Insight(format!("malformed gateway response: {e}")))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| FluxoError::Insight("gateway response contained no choices".to_string()))
    }
}

/// Map a gateway response status to a user-facing error, if any.
///
/// Quota exhaustion (429) and missing credits (402) get their own messages;
/// every other non-success status reports the raw status code.
fn map_status(status: StatusCode) -> Option<FluxoError> {
    match status {
        StatusCode::TOO_MANY_REQUESTS => Some(FluxoError::Insight(
            "rate limit exceeded, try again in a few moments".to_string(),
        )),
        StatusCode::PAYMENT_REQUIRED => Some(FluxoError::Insight(
            "insufficient gateway credits".to_string(),
        )),
        status if !status.is_success() => Some(FluxoError::Insight(format!(
            "gateway returned status {status}"
        ))),
        _ => None,
    }
}

/// Build the numbered-section analysis prompt around the serialized series.
fn build_prompt(records: &[CashflowRecord], file_name: &str) -> FluxoResult<String> {
    let series = serde_json::to_string_pretty(records)?;

    Ok(format!(
        "Cash-flow analysis - {file_name}\n\
         \n\
         Monthly series:\n\
         {series}\n\
         \n\
         IMPORTANT: the cash flow has three main components:\n\
         1. RECEITAS - amounts received through accounts receivable\n\
         2. DESPESAS - amounts paid through accounts payable\n\
         3. OUTROS - treasury movements (bank fees, investment income, taxes, etc.)\n\
         \n\
         NET FLOW FORMULA: Saldo = Receitas - Despesas + Outros\n\
         \n\
         Please analyze this financial data and provide:\n\
         1. Main trends observed in revenues, expenses and treasury movements (OUTROS)\n\
         2. Specific analysis of the OUTROS items - identify the main treasury sources\n\
         3. Warnings or points of attention, considering the impact of OUTROS on the net flow\n\
         4. Optimization opportunities (including treasury management)\n\
         5. Projections and strategic recommendations\n\
         6. Seasonality analysis, if applicable\n\
         \n\
         Be specific, use numbers from the data where relevant, and provide actionable \
         insights covering every component of the flow.\n"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_records() -> Vec<CashflowRecord> {
        vec![
            CashflowRecord::new("JAN/2025".to_string(), 1000.0, 400.0, -50.0),
            CashflowRecord::new("FEV/2025".to_string(), 1200.0, 600.0, 0.0),
        ]
    }

    #[test]
    fn test_prompt_carries_file_name_and_series() {
        let prompt = build_prompt(&sample_records(), "fluxo-2025.xlsx").unwrap();
        assert!(prompt.contains("fluxo-2025.xlsx"));
        assert!(prompt.contains("JAN/2025"));
        assert!(prompt.contains("\"balance\": 550.0"));
    }

    #[test]
    fn test_map_status_quota_exhaustion() {
        match map_status(StatusCode::TOO_MANY_REQUESTS) {
            Some(FluxoError::Insight(msg)) => assert!(msg.contains("rate limit")),
            other => panic!("expected Insight error, got {other:?}"),
        }
    }

    #[test]
    fn test_map_status_missing_credits() {
        match map_status(StatusCode::PAYMENT_REQUIRED) {
            Some(FluxoError::Insight(msg)) => assert!(msg.contains("credits")),
            other => panic!("expected Insight error, got {other:?}"),
        }
    }

    #[test]
    fn test_map_status_generic_failure_carries_the_code() {
        match map_status(StatusCode::INTERNAL_SERVER_ERROR) {
            Some(FluxoError::Insight(msg)) => assert!(msg.contains("500")),
            other => panic!("expected Insight error, got {other:?}"),
        }
        match map_status(StatusCode::UNAUTHORIZED) {
            Some(FluxoError::Insight(msg)) => assert!(msg.contains("401")),
            other => panic!("expected Insight error, got {other:?}"),
        }
    }

    #[test]
    fn test_map_status_success_is_not_an_error() {
        assert!(map_status(StatusCode::OK).is_none());
        assert!(map_status(StatusCode::CREATED).is_none());
    }

    #[test]
    fn test_prompt_has_all_six_sections() {
        let prompt = build_prompt(&sample_records(), "f.xlsx").unwrap();
        for section in 1..=6 {
            assert!(
                prompt.contains(&format!("{section}. ")),
                "missing section {section}"
            );
        }
        assert!(prompt.contains("Saldo = Receitas - Despesas + Outros"));
    }
}
