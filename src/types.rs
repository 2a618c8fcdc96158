use serde::{Deserialize, Serialize};
use starknet_core::types::Felt;
use starknet_core::utils::get_selector_from_name;

use crate::error::{Result, WalletError};
use crate::network::Network;

/// Tokens the wallet can send
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TokenSymbol {
    Eth,
    Strk,
    Usdc,
}

impl TokenSymbol {
    pub const ALL: [TokenSymbol; 3] = [TokenSymbol::Eth, TokenSymbol::Strk, TokenSymbol::Usdc];

    pub fn as_str(&self) -> &'static str {
        match self {
            TokenSymbol::Eth => "ETH",
            TokenSymbol::Strk => "STRK",
            TokenSymbol::Usdc => "USDC",
        }
    }
}

impl std::fmt::Display for TokenSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TokenSymbol {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "ETH" => Ok(TokenSymbol::Eth),
            "STRK" => Ok(TokenSymbol::Strk),
            "USDC" => Ok(TokenSymbol::Usdc),
            other => Err(WalletError::Config(format!("Unsupported token: {}", other))),
        }
    }
}

/// Static per-token send parameters
///
/// `min_amount` is kept as a decimal string so the minimum check never goes
/// through floating point. `decimals` is a property of the token contract and
/// never comes from user input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TokenSendConfig {
    pub min_amount: &'static str,
    pub estimated_gas_price: f64,
    pub decimals: u32,
}

impl TokenSendConfig {
    pub const ETH: TokenSendConfig = TokenSendConfig {
        min_amount: "0.001",
        estimated_gas_price: 0.00001,
        decimals: 18,
    };

    pub const STRK: TokenSendConfig = TokenSendConfig {
        min_amount: "1",
        estimated_gas_price: 0.1,
        decimals: 18,
    };

    pub const USDC: TokenSendConfig = TokenSendConfig {
        min_amount: "0.1",
        estimated_gas_price: 0.5,
        decimals: 6,
    };

    pub fn for_token(token: TokenSymbol) -> Self {
        match token {
            TokenSymbol::Eth => Self::ETH,
            TokenSymbol::Strk => Self::STRK,
            TokenSymbol::Usdc => Self::USDC,
        }
    }
}

/// Raw, unvalidated send request as typed by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub token: TokenSymbol,
    pub to_address: String,
    pub amount_human: String,
}

impl TransferRequest {
    pub fn new(token: TokenSymbol, to_address: impl Into<String>, amount_human: impl Into<String>) -> Self {
        Self {
            token,
            to_address: to_address.into(),
            amount_human: amount_human.into(),
        }
    }
}

/// Wallet record bound to the signed-in identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletData {
    pub public_key: String,
    pub encrypted_private_key: String,
}

/// A single contract invocation inside a multicall
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractCall {
    pub contract_address: String,
    pub entrypoint: String,
    pub calldata: Vec<String>,
}

impl ContractCall {
    /// ERC20 `transfer(recipient, amount: u256)` with the amount already split into limbs
    pub fn transfer(contract_address: &str, calldata: Vec<String>) -> Self {
        Self {
            contract_address: contract_address.to_string(),
            entrypoint: "transfer".to_string(),
            calldata,
        }
    }

    /// Entrypoint selector (starknet_keccak of the entrypoint name)
    pub fn selector(&self) -> Result<Felt> {
        get_selector_from_name(&self.entrypoint)
            .map_err(|e| WalletError::Other(format!("Invalid entrypoint '{}': {}", self.entrypoint, e)))
    }
}

/// Payload handed to the gasless executor
///
/// The bearer token travels as an HTTP header, never in the JSON body.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallContractParams {
    pub encrypt_key: String,
    pub wallet: WalletData,
    #[serde(skip_serializing)]
    pub bearer_token: String,
    pub contract_address: String,
    pub calls: Vec<ContractCall>,
}

impl std::fmt::Debug for CallContractParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallContractParams")
            .field("encrypt_key", &"<redacted>")
            .field("wallet", &self.wallet.public_key)
            .field("bearer_token", &"<redacted>")
            .field("contract_address", &self.contract_address)
            .field("calls", &self.calls)
            .finish()
    }
}

/// Result of a successful send
#[derive(Debug, Clone)]
pub struct SendReceipt {
    /// Transaction hash, or `"pending"` when the executor did not return one
    pub tx_hash: String,
    pub token: TokenSymbol,
    pub amount: String,
    pub to_address: String,
    pub network: Network,
    pub explorer_url: Option<String>,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}

impl SendReceipt {
    pub fn is_pending(&self) -> bool {
        self.tx_hash == crate::providers::PENDING_TX_HASH
    }
}

impl std::fmt::Display for SendReceipt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Sent {} {} to {} on {} | tx: {}",
            self.amount, self.token, self.to_address, self.network, self.tx_hash
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_symbol_parsing() {
        assert_eq!("usdc".parse::<TokenSymbol>().unwrap(), TokenSymbol::Usdc);
        assert_eq!(" Strk ".parse::<TokenSymbol>().unwrap(), TokenSymbol::Strk);
        assert!("BTC".parse::<TokenSymbol>().is_err());
        assert_eq!(TokenSymbol::Eth.to_string(), "ETH");
    }

    #[test]
    fn test_send_config_table() {
        assert_eq!(TokenSendConfig::for_token(TokenSymbol::Usdc).decimals, 6);
        assert_eq!(TokenSendConfig::for_token(TokenSymbol::Eth).decimals, 18);
        assert_eq!(TokenSendConfig::for_token(TokenSymbol::Strk).min_amount, "1");
    }

    #[test]
    fn test_transfer_call_serialization() {
        let call = ContractCall::transfer("0x53c9", vec!["0x1".into(), "0x2".into(), "0x0".into()]);
        let json = serde_json::to_value(&call).unwrap();
        assert_eq!(json["contractAddress"], "0x53c9");
        assert_eq!(json["entrypoint"], "transfer");
        assert_eq!(json["calldata"][2], "0x0");
    }

    #[test]
    fn test_transfer_selector() {
        let call = ContractCall::transfer("0x1", vec![]);
        let selector = call.selector().unwrap();
        assert_eq!(
            selector,
            Felt::from_hex("0x83afd3f4caedc6eebf44246fe54e38c95e3179a5ec9ea81740eca5b482d12e").unwrap()
        );
        assert_eq!(
            selector.to_hex_string(),
            "0x83afd3f4caedc6eebf44246fe54e38c95e3179a5ec9ea81740eca5b482d12e"
        );
    }

    #[test]
    fn test_params_hide_secrets() {
        let params = CallContractParams {
            encrypt_key: "secret-key".to_string(),
            wallet: WalletData {
                public_key: "0xabc".to_string(),
                encrypted_private_key: "enc".to_string(),
            },
            bearer_token: "jwt".to_string(),
            contract_address: "0x1".to_string(),
            calls: vec![],
        };

        let debug = format!("{:?}", params);
        assert!(!debug.contains("secret-key"));
        assert!(!debug.contains("jwt"));

        let json = serde_json::to_value(&params).unwrap();
        assert!(json.get("bearerToken").is_none());
        assert_eq!(json["encryptKey"], "secret-key");
        assert_eq!(json["wallet"]["encryptedPrivateKey"], "enc");
    }
}
