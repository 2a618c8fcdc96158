//! Per-network token registry
//!
//! The selected network is an explicit value handed to the dispatcher on every
//! call. Nothing in the send pipeline reads a global "current network".

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::error::{Result, SendError, WalletError};
use crate::types::TokenSymbol;

const ETH_ADDRESS: &str = "0x049d36570d4e46f48e99674bd3fcc84644ddd6b96f7c741b1562b82f9e004dc7";
const STRK_ADDRESS: &str = "0x04718f5a0fc34cc1af16a1cdee98ffb20c31f5cd61d6ab07201858f4287c938d";
const USDC_ADDRESS: &str = "0x053c91253bc9682c04929ca02ed00b3e423f6710d2ee7e0d5ebb06f3ecf368a8";

/// Starknet network the wallet talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Network {
    #[default]
    Sepolia,
    Mainnet,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Sepolia => "SEPOLIA",
            Network::Mainnet => "MAINNET",
        }
    }

    /// Chain ID short string
    pub fn chain_id(&self) -> &'static str {
        match self {
            Network::Sepolia => "SN_SEPOLIA",
            Network::Mainnet => "SN_MAIN",
        }
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Network {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "SEPOLIA" | "SN_SEPOLIA" | "TESTNET" => Ok(Network::Sepolia),
            "MAINNET" | "SN_MAIN" => Ok(Network::Mainnet),
            other => Err(WalletError::Config(format!("Unknown network: {}", other))),
        }
    }
}

/// Token contract on one network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConfig {
    pub address: String,
    pub decimals: u32,
}

/// False for empty addresses and the placeholder patterns used in shipped configs
/// (`0x0...`, `placeholder`, `0x__NAME__`)
pub fn is_configured(address: &str) -> bool {
    let lower = address.trim().to_lowercase();
    !(lower.is_empty() || lower.starts_with("0x0...") || lower.contains("placeholder") || lower.contains("__"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    pub network: Network,
    pub explorer: String,
    pub tokens: BTreeMap<TokenSymbol, TokenConfig>,
}

impl NetworkConfig {
    /// Built-in token addresses for `network`
    pub fn for_network(network: Network) -> Self {
        let explorer = match network {
            Network::Sepolia => "https://sepolia.starkscan.co",
            Network::Mainnet => "https://starkscan.co",
        };

        let tokens = BTreeMap::from([
            (TokenSymbol::Eth, TokenConfig { address: ETH_ADDRESS.to_string(), decimals: 18 }),
            (TokenSymbol::Strk, TokenConfig { address: STRK_ADDRESS.to_string(), decimals: 18 }),
            (TokenSymbol::Usdc, TokenConfig { address: USDC_ADDRESS.to_string(), decimals: 6 }),
        ]);

        Self {
            network,
            explorer: explorer.to_string(),
            tokens,
        }
    }

    pub fn sepolia() -> Self {
        Self::for_network(Network::Sepolia)
    }

    pub fn mainnet() -> Self {
        Self::for_network(Network::Mainnet)
    }

    /// Built-in addresses with `STARKNET_<NETWORK>_<TOKEN>` environment overrides applied
    pub fn from_env(network: Network) -> Self {
        Self::for_network(network).with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply address overrides looked up by variable name; blank values are ignored
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        for (symbol, token) in self.tokens.iter_mut() {
            let key = Self::override_key(self.network, *symbol);
            if let Some(value) = lookup(&key) {
                let value = value.trim();
                if !value.is_empty() {
                    debug!("Overriding {} address on {} from {}", symbol, self.network, key);
                    token.address = value.to_string();
                }
            }
        }
        self
    }

    pub fn override_key(network: Network, token: TokenSymbol) -> String {
        format!("STARKNET_{}_{}", network.as_str(), token.as_str())
    }

    /// Contract address of `token`, or `TokenNotConfigured` when missing or a placeholder
    pub fn token_address(&self, token: TokenSymbol) -> std::result::Result<&str, SendError> {
        match self.tokens.get(&token) {
            Some(config) if is_configured(&config.address) => Ok(config.address.as_str()),
            _ => {
                warn!("Token {} has no usable contract address on {}", token, self.network);
                Err(SendError::TokenNotConfigured {
                    token,
                    network: self.network,
                })
            }
        }
    }

    pub fn is_available(&self, token: TokenSymbol) -> bool {
        self.tokens
            .get(&token)
            .map(|config| is_configured(&config.address))
            .unwrap_or(false)
    }

    /// Block explorer link for a transaction
    pub fn tx_url(&self, tx_hash: &str) -> String {
        format!("{}/tx/{}", self.explorer.trim_end_matches('/'), tx_hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_builtin_registry() {
        let config = NetworkConfig::mainnet();
        assert_eq!(config.token_address(TokenSymbol::Usdc).unwrap(), USDC_ADDRESS);
        assert_eq!(config.tokens[&TokenSymbol::Eth].decimals, 18);
        assert!(TokenSymbol::ALL.iter().all(|t| config.is_available(*t)));
    }

    #[test]
    fn test_placeholder_detection() {
        assert!(is_configured(USDC_ADDRESS));
        assert!(!is_configured(""));
        assert!(!is_configured("0x0..."));
        assert!(!is_configured("0x0strkplaceholder0000"));
        assert!(!is_configured("0x__VTOKEN_USDC_RE7__"));
    }

    #[test]
    fn test_placeholder_is_not_configured() {
        let mut config = NetworkConfig::sepolia();
        config.tokens.get_mut(&TokenSymbol::Strk).unwrap().address = "0x0...".to_string();
        config.tokens.remove(&TokenSymbol::Usdc);

        assert_eq!(
            config.token_address(TokenSymbol::Strk),
            Err(SendError::TokenNotConfigured {
                token: TokenSymbol::Strk,
                network: Network::Sepolia
            })
        );
        assert!(config.token_address(TokenSymbol::Usdc).is_err());
        assert!(!config.is_available(TokenSymbol::Usdc));
    }

    #[test]
    fn test_overrides() {
        let vars = HashMap::from([
            ("STARKNET_MAINNET_USDC".to_string(), " 0xabc ".to_string()),
            ("STARKNET_MAINNET_ETH".to_string(), "   ".to_string()),
            ("STARKNET_SEPOLIA_STRK".to_string(), "0xdef".to_string()),
        ]);

        let config = NetworkConfig::mainnet().with_overrides(|key| vars.get(key).cloned());
        assert_eq!(config.token_address(TokenSymbol::Usdc).unwrap(), "0xabc");
        assert_eq!(config.token_address(TokenSymbol::Eth).unwrap(), ETH_ADDRESS);
        assert_eq!(config.token_address(TokenSymbol::Strk).unwrap(), STRK_ADDRESS);
    }

    #[test]
    fn test_network_parsing() {
        assert_eq!("sepolia".parse::<Network>().unwrap(), Network::Sepolia);
        assert_eq!("SN_MAIN".parse::<Network>().unwrap(), Network::Mainnet);
        assert!("goerli".parse::<Network>().is_err());
        assert_eq!(Network::default(), Network::Sepolia);
        assert_eq!(Network::Mainnet.chain_id(), "SN_MAIN");
    }

    #[test]
    fn test_tx_url() {
        assert_eq!(NetworkConfig::sepolia().tx_url("0x12"), "https://sepolia.starkscan.co/tx/0x12");
    }
}
