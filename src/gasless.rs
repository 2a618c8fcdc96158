use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::error::{Result, WalletError};
use crate::providers::GaslessExecutor;
use crate::types::CallContractParams;

pub const DEFAULT_GASLESS_BASE_URL: &str = "https://api.chipipay.com/v1";
const CALL_CONTRACT_PATH: &str = "transactions/call-any-contract";

/// Error envelope returned by the managed-wallet API
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// HTTP client for the managed-wallet provider's sponsored execution endpoint
pub struct HttpGaslessExecutor {
    client: Client,
    endpoint: Url,
    api_key: Option<String>,
}

impl HttpGaslessExecutor {
    /// Create an executor against the default endpoint
    pub fn new_default(api_key: Option<String>) -> Result<Self> {
        Self::new(DEFAULT_GASLESS_BASE_URL, api_key, Duration::from_secs(30))
    }

    /// Create an executor with a custom base URL and request timeout
    pub fn new(base_url: &str, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("starknet-gasless-send/0.1.0")
            .build()?;

        Ok(Self {
            client,
            endpoint: call_contract_url(base_url)?,
            api_key,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// `{base_url}/transactions/call-any-contract`, tolerant of a trailing slash
pub fn call_contract_url(base_url: &str) -> Result<Url> {
    let mut base = Url::parse(base_url)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base.join(CALL_CONTRACT_PATH)?)
}

fn is_hex_hash(text: &str) -> bool {
    text.strip_prefix("0x")
        .map(|hex| !hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit()))
        .unwrap_or(false)
}

/// Turn a response body into the executor result
///
/// Error envelopes become `ApiError`. A `{ "data": ... }` wrapper is unwrapped;
/// anything else is returned as-is for hash normalization. A non-JSON body is
/// kept only when it is a bare `0x` hash, otherwise it maps to `Null`.
pub fn parse_call_response(body: &str) -> Result<Value> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Ok(Value::Null);
    }

    let value: Value = match serde_json::from_str(trimmed) {
        Ok(value) => value,
        // Some deployments answer with the bare hash as plain text
        Err(_) if is_hex_hash(trimmed) => return Ok(Value::String(trimmed.to_string())),
        Err(_) => {
            warn!("Ignoring non-JSON response body: {}", trimmed);
            return Ok(Value::Null);
        }
    };

    if let Some(error) = value.get("error").filter(|e| !e.is_null()) {
        let message = match serde_json::from_value::<ApiErrorBody>(error.clone()) {
            Ok(ApiErrorBody { code: Some(code), message: Some(message) }) => format!("{}: {}", code, message),
            Ok(ApiErrorBody { message: Some(message), .. }) => message,
            _ => error.to_string(),
        };
        return Err(WalletError::ApiError(message));
    }

    match value {
        Value::Object(mut fields) if fields.contains_key("data") => {
            Ok(fields.remove("data").unwrap_or(Value::Null))
        }
        other => Ok(other),
    }
}

impl GaslessExecutor for HttpGaslessExecutor {
    async fn call_contract(&self, params: CallContractParams) -> Result<Value> {
        debug!(
            "Submitting {} call(s) to {} via {}",
            params.calls.len(),
            params.contract_address,
            self.endpoint
        );

        let mut request = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&params.bearer_token)
            .json(&params);

        if let Some(api_key) = &self.api_key {
            request = request.header("x-api-key", api_key);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("API error: {} - {}", status, error_text);
            return Err(WalletError::ApiError(format!("HTTP {}: {}", status, error_text)));
        }

        let body = response.text().await?;
        debug!("Call contract response: {}", body);

        let result = parse_call_response(&body)?;
        info!("Gasless call accepted for {}", params.contract_address);
        Ok(result)
    }
}
