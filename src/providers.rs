//! Collaborator seams of the send pipeline
//!
//! Identity, wallet lookup and gasless execution are owned by external
//! services. The dispatcher only sees these traits, so tests can swap in
//! fakes and the CLI can wire in the HTTP executor.

use std::future::Future;

use serde_json::Value;
use tracing::warn;

use crate::error::Result;
use crate::types::{CallContractParams, WalletData};

/// Placeholder hash returned when the executor accepted the call but did not report a hash
pub const PENDING_TX_HASH: &str = "pending";

/// Field names the gasless API has been seen to use for the transaction hash, in lookup order
pub const TX_HASH_FIELDS: [&str; 4] = ["transaction_hash", "transactionHash", "hash", "txHash"];

/// Signed-in identity
pub trait IdentityProvider {
    fn current_user_id(&self) -> Option<String>;

    /// Short-lived bearer credential; `None` when the session cannot produce one
    fn bearer_token(&self) -> impl Future<Output = Option<String>>;
}

/// Wallet previously created for the current identity
pub trait WalletStore {
    fn wallet(&self) -> Option<WalletData>;
}

/// Relayer that signs and pays for contract calls on the wallet's behalf
pub trait GaslessExecutor {
    /// Returns the raw response; see [`extract_tx_hash`] for its accepted shapes
    fn call_contract(&self, params: CallContractParams) -> impl Future<Output = Result<Value>>;
}

/// Find the transaction hash in an executor response
///
/// Accepts a bare string or an object carrying one of [`TX_HASH_FIELDS`].
pub fn extract_tx_hash(response: &Value) -> Option<String> {
    match response {
        Value::String(hash) if !hash.is_empty() => Some(hash.clone()),
        Value::Object(fields) => TX_HASH_FIELDS
            .iter()
            .filter_map(|name| fields.get(*name).and_then(Value::as_str))
            .find(|hash| !hash.is_empty())
            .map(str::to_string),
        _ => None,
    }
}

/// [`extract_tx_hash`] with the `"pending"` fallback
pub fn normalize_tx_hash(response: &Value) -> String {
    extract_tx_hash(response).unwrap_or_else(|| {
        warn!("No transaction hash in executor response: {}", response);
        PENDING_TX_HASH.to_string()
    })
}

/// Identity with a fixed user id and token, e.g. taken from the environment
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    pub user_id: Option<String>,
    pub bearer_token: Option<String>,
}

impl StaticIdentity {
    pub fn new(user_id: impl Into<String>, bearer_token: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            bearer_token: Some(bearer_token.into()),
        }
    }

    /// `USER_ID` and `BEARER_TOKEN`
    pub fn from_env() -> Self {
        Self {
            user_id: non_empty_env("USER_ID"),
            bearer_token: non_empty_env("BEARER_TOKEN"),
        }
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_user_id(&self) -> Option<String> {
        self.user_id.clone()
    }

    async fn bearer_token(&self) -> Option<String> {
        self.bearer_token.clone()
    }
}

#[derive(Debug, Clone, Default)]
pub struct StaticWalletStore {
    pub wallet: Option<WalletData>,
}

impl StaticWalletStore {
    pub fn new(wallet: WalletData) -> Self {
        Self { wallet: Some(wallet) }
    }

    /// `WALLET_PUBLIC_KEY` and `WALLET_ENCRYPTED_PRIVATE_KEY`; both must be set
    pub fn from_env() -> Self {
        let wallet = match (
            non_empty_env("WALLET_PUBLIC_KEY"),
            non_empty_env("WALLET_ENCRYPTED_PRIVATE_KEY"),
        ) {
            (Some(public_key), Some(encrypted_private_key)) => Some(WalletData {
                public_key,
                encrypted_private_key,
            }),
            _ => None,
        };
        Self { wallet }
    }
}

impl WalletStore for StaticWalletStore {
    fn wallet(&self) -> Option<WalletData> {
        self.wallet.clone()
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
