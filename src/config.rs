//! Settings for the `send_tokens` binary
//!
//! Non-secret settings come from a JSON file; credentials come from the
//! environment (optionally via `.env`).

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::error::{Result, WalletError};
use crate::gasless::DEFAULT_GASLESS_BASE_URL;
use crate::network::Network;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub network: Network,
    #[serde(default = "default_gasless_base_url")]
    pub gasless_base_url: String,
    #[serde(default = "default_request_timeout_sec")]
    pub request_timeout_sec: u64,
    #[serde(default = "default_require_confirmation")]
    pub require_confirmation: bool,
}

fn default_gasless_base_url() -> String {
    DEFAULT_GASLESS_BASE_URL.to_string()
}

fn default_request_timeout_sec() -> u64 {
    30
}

fn default_require_confirmation() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            network: Network::default(),
            gasless_base_url: default_gasless_base_url(),
            request_timeout_sec: default_request_timeout_sec(),
            require_confirmation: default_require_confirmation(),
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: AppConfig = serde_json::from_str(json)?;
        if config.request_timeout_sec == 0 {
            return Err(WalletError::Config("request_timeout_sec must be > 0".to_string()));
        }
        Ok(config)
    }

    /// Load from `path`; a missing file yields the defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!("{} not found, using default settings", path.display());
            return Ok(Self::default());
        }
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_sec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config = AppConfig::from_json(r#"{ "network": "MAINNET" }"#).unwrap();
        assert_eq!(config.network, Network::Mainnet);
        assert_eq!(config.gasless_base_url, DEFAULT_GASLESS_BASE_URL);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(config.require_confirmation);

        assert_eq!(AppConfig::from_json("{}").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(AppConfig::from_json(r#"{ "network": "GOERLI" }"#).is_err());
        assert!(matches!(
            AppConfig::from_json(r#"{ "request_timeout_sec": 0 }"#),
            Err(WalletError::Config(_))
        ));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = AppConfig::load("/nonexistent/send_config.json").unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
