//! AWS Lambda handler for account projections
//!
//! Accepts a JSON projection request, either as the direct invocation payload
//! or as the `body` string of a Lambda Function URL event, and returns the
//! summary and full ledger of every account.

use invest_projection::{
    account::{default_accounts, DEFAULT_BROKERAGE_COST},
    projection::{LedgerSummary, MonthlyRecord, SimulationConfig, DEFAULT_START_YEAR, DEFAULT_YEARS},
    AccountConfig, Comparison, ScenarioRunner,
};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Input configuration for the projection
#[derive(Debug, Deserialize)]
pub struct ProjectionRequest {
    /// Accounts to simulate (default: Assurance Vie and PEA presets)
    #[serde(default)]
    pub accounts: Vec<AccountConfig>,

    /// Number of years to simulate (default: 30)
    #[serde(default = "default_years")]
    pub years: u32,

    /// Year of the first simulated month (default: 2025)
    #[serde(default = "default_start_year")]
    pub start_year: i32,

    /// Optional column to compare across accounts
    #[serde(default)]
    pub column: Option<String>,
}

fn default_years() -> u32 { DEFAULT_YEARS }
fn default_start_year() -> i32 { DEFAULT_START_YEAR }

#[derive(Debug, Serialize)]
pub struct AccountOutput {
    pub account: AccountConfig,
    pub summary: LedgerSummary,
    pub ledger: Vec<MonthlyRecord>,
}

/// Output from the projection
#[derive(Debug, Serialize)]
pub struct ProjectionResponse {
    pub years: u32,
    pub start_year: i32,
    pub accounts: Vec<AccountOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<Comparison>,
    pub execution_time_ms: u64,
}

/// Unwrap a Function URL envelope; anything else is the request itself
fn extract_request(payload: Value) -> Result<ProjectionRequest, serde_json::Error> {
    match payload.get("body") {
        Some(Value::String(body)) => serde_json::from_str(body),
        _ => serde_json::from_value(payload),
    }
}

fn project(request: ProjectionRequest) -> Result<ProjectionResponse, invest_projection::ProjectionError> {
    let start = std::time::Instant::now();

    let accounts = if request.accounts.is_empty() {
        default_accounts(DEFAULT_BROKERAGE_COST)
    } else {
        request.accounts
    };

    let runner = ScenarioRunner::with_config(
        request.years,
        SimulationConfig { start_year: request.start_year },
    );
    let engines = runner.run_batch(&accounts)?;

    let comparison = request
        .column
        .as_deref()
        .map(|column| Comparison::from_engines(&engines, column));

    let outputs = engines
        .into_iter()
        .map(|engine| AccountOutput {
            summary: engine.ledger().summary(),
            ledger: engine.ledger().records().to_vec(),
            account: engine.account().clone(),
        })
        .collect();

    Ok(ProjectionResponse {
        years: request.years,
        start_year: request.start_year,
        accounts: outputs,
        comparison,
        execution_time_ms: start.elapsed().as_millis() as u64,
    })
}

/// Status code and JSON body for a raw payload
fn handle_payload(payload: Value) -> (u16, Value) {
    let request = match extract_request(payload) {
        Ok(r) => r,
        Err(e) => return (400, json!({ "error": format!("Invalid JSON: {}", e) })),
    };

    match project(request) {
        Ok(response) => match serde_json::to_value(&response) {
            Ok(body) => (200, body),
            Err(e) => (500, json!({ "error": e.to_string() })),
        },
        Err(e) => (400, json!({ "error": e.to_string() })),
    }
}

/// Lambda handler function
async fn handler(event: LambdaEvent<Value>) -> Result<Value, Error> {
    let is_function_url = event.payload.get("requestContext").is_some();
    let (status, body) = handle_payload(event.payload);

    if status != 200 {
        log::warn!("Projection request failed with {}: {}", status, body);
    }

    if is_function_url {
        Ok(json!({
            "statusCode": status,
            "headers": {
                "Content-Type": "application/json",
                "Access-Control-Allow-Origin": "*",
            },
            "body": body.to_string(),
        }))
    } else {
        Ok(body)
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_request_runs_presets() {
        let (status, body) = handle_payload(json!({ "years": 2 }));

        assert_eq!(status, 200);
        let accounts = body["accounts"].as_array().unwrap();
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0]["ledger"].as_array().unwrap().len(), 24);
        assert_eq!(accounts[1]["account"]["name"], "PEA");
    }

    #[test]
    fn test_function_url_body_is_unwrapped() {
        let inner = json!({
            "accounts": [{
                "name": "Custom",
                "start_amount": 1000.0,
                "management_fee": 0.5,
                "market_growth": 0.05,
                "dividend_yield": 0.0,
                "monthly_contribution": 100.0
            }],
            "years": 1,
            "start_year": 2030,
            "column": "Total balance"
        });
        let payload = json!({ "requestContext": {}, "body": inner.to_string() });

        let (status, body) = handle_payload(payload);
        assert_eq!(status, 200);
        assert_eq!(body["accounts"][0]["ledger"][0]["label"], "January 2030");
        assert_eq!(body["comparison"]["series"][0]["account"], "Custom");
    }

    #[test]
    fn test_zero_years_is_bad_request() {
        let (status, body) = handle_payload(json!({ "years": 0 }));
        assert_eq!(status, 400);
        assert!(body["error"].as_str().unwrap().contains("Invalid horizon"));
    }

    #[test]
    fn test_oversized_horizon_is_bad_request() {
        let (status, body) = handle_payload(json!({ "years": u32::MAX }));
        assert_eq!(status, 400);
        assert!(body["error"].as_str().unwrap().contains("Invalid horizon"));
    }

    #[test]
    fn test_negative_years_is_bad_request() {
        let (status, _) = handle_payload(json!({ "years": -3 }));
        assert_eq!(status, 400);
    }
}
