use thiserror::Error;

use crate::network::Network;
use crate::types::TokenSymbol;

/// Infrastructure errors raised by the HTTP executor, config loading and
/// base-unit parsing.
#[derive(Error, Debug)]
pub enum WalletError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Invalid decimal amount: {0}")]
    InvalidDecimal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Other error: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, WalletError>;

/// Why an amount was rejected before any conversion happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountRejection {
    Required,
    NotANumber,
    BelowMinimum { min: String },
}

impl std::fmt::Display for AmountRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AmountRejection::Required => write!(f, "Amount is required"),
            AmountRejection::NotANumber => write!(f, "Invalid amount"),
            AmountRejection::BelowMinimum { min } => write!(f, "Minimum amount is {}", min),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressRejection {
    Required,
    Malformed,
}

impl std::fmt::Display for AddressRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AddressRejection::Required => write!(f, "Address is required"),
            AddressRejection::Malformed => write!(f, "Invalid Starknet address format"),
        }
    }
}

/// Every way a send attempt can fail. All variants are recoverable by the
/// caller; none of them is raised as a panic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SendError {
    #[error("{0}")]
    InvalidAmount(AmountRejection),

    #[error("{0}")]
    InvalidAddress(AddressRejection),

    #[error("User not authenticated")]
    NotAuthenticated,

    #[error("Wallet not found")]
    WalletNotFound,

    #[error("Authentication failed")]
    AuthFailed,

    #[error("Token address not configured for {token} on {network}")]
    TokenNotConfigured { token: TokenSymbol, network: Network },

    #[error("{0}")]
    TransactionFailed(String),
}

impl From<WalletError> for SendError {
    fn from(err: WalletError) -> Self {
        match err {
            // Executor-reported failures already carry the vendor message
            WalletError::ApiError(msg) | WalletError::Other(msg) => SendError::TransactionFailed(msg),
            other => SendError::TransactionFailed(other.to_string()),
        }
    }
}
