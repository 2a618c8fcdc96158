pub mod config;
pub mod dispatcher;
pub mod error;
pub mod fee;
pub mod gasless;
pub mod keys;
pub mod network;
pub mod providers;
pub mod types;
pub mod units;
pub mod validation;

// Re-export commonly used types
pub use config::AppConfig;
pub use dispatcher::{SendAssets, SendState};
pub use error::{AddressRejection, AmountRejection, Result, SendError, WalletError};
pub use fee::{estimate_cost, estimate_fee, estimate_total_cost, EstimatedCost};
pub use gasless::HttpGaslessExecutor;
pub use keys::{derive_encrypt_key, KeyDeriver, SaltedSha256Deriver};
pub use network::{is_configured, Network, NetworkConfig, TokenConfig};
pub use providers::{
    extract_tx_hash, normalize_tx_hash, GaslessExecutor, IdentityProvider, StaticIdentity,
    StaticWalletStore, WalletStore, PENDING_TX_HASH,
};
pub use types::{
    CallContractParams, ContractCall, SendReceipt, TokenSendConfig, TokenSymbol, TransferRequest,
    WalletData,
};
pub use units::{prepare_transfer, to_base_units, to_limbs, PreparedTransfer, U256Limbs};
pub use validation::{validate_address, validate_amount};

/// Initialize logging for the library
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Just verify that main exports are accessible
        let _ = HttpGaslessExecutor::new_default(None);
        let _ = NetworkConfig::from_env(Network::Sepolia);
        let _ = TokenSendConfig::for_token(TokenSymbol::Usdc);
    }
}
