//! Send-asset dispatcher
//!
//! Drives one transfer from raw user input to a submitted gasless call:
//! validate amount, validate address, resolve identity and wallet, derive the
//! encrypt key, fetch a bearer token, resolve the token contract, build
//! `transfer` calldata and submit it. Every failure comes back as a
//! [`SendError`]; nothing is retried.

use tracing::{debug, error, info};

use crate::error::SendError;
use crate::fee::{estimate_cost, EstimatedCost};
use crate::keys::{KeyDeriver, SaltedSha256Deriver};
use crate::network::NetworkConfig;
use crate::providers::{normalize_tx_hash, GaslessExecutor, IdentityProvider, WalletStore};
use crate::types::{CallContractParams, ContractCall, SendReceipt, TokenSendConfig, TokenSymbol, TransferRequest};
use crate::units::prepare_transfer;
use crate::validation;

/// Lifecycle of a single send attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SendState {
    #[default]
    Idle,
    Validating,
    Preparing,
    Dispatching,
    Succeeded,
    Failed,
}

impl SendState {
    /// True while a send is running; the confirm action should be disabled
    pub fn is_in_flight(&self) -> bool {
        matches!(self, SendState::Validating | SendState::Preparing | SendState::Dispatching)
    }
}

/// Send pipeline for one token, wired to its collaborators
///
/// `send_transaction` takes `&mut self`, so a second dispatch cannot start on
/// the same instance while one is awaiting the executor.
pub struct SendAssets<I, W, E, K = SaltedSha256Deriver> {
    token: TokenSymbol,
    config: TokenSendConfig,
    identity: I,
    wallets: W,
    executor: E,
    keys: K,
    state: SendState,
    last_error: Option<SendError>,
    last_tx_hash: Option<String>,
}

impl<I, W, E> SendAssets<I, W, E, SaltedSha256Deriver>
where
    I: IdentityProvider,
    W: WalletStore,
    E: GaslessExecutor,
{
    /// Pipeline using the salted SHA-256 key derivation (salt from `ENCRYPT_SALT`)
    pub fn new(token: TokenSymbol, identity: I, wallets: W, executor: E) -> Self {
        Self::with_key_deriver(token, identity, wallets, executor, SaltedSha256Deriver::from_env())
    }
}

impl<I, W, E, K> SendAssets<I, W, E, K>
where
    I: IdentityProvider,
    W: WalletStore,
    E: GaslessExecutor,
    K: KeyDeriver,
{
    pub fn with_key_deriver(token: TokenSymbol, identity: I, wallets: W, executor: E, keys: K) -> Self {
        Self {
            token,
            config: TokenSendConfig::for_token(token),
            identity,
            wallets,
            executor,
            keys,
            state: SendState::Idle,
            last_error: None,
            last_tx_hash: None,
        }
    }

    pub fn token(&self) -> TokenSymbol {
        self.token
    }

    pub fn state(&self) -> SendState {
        self.state
    }

    pub fn last_error(&self) -> Option<&SendError> {
        self.last_error.as_ref()
    }

    pub fn last_tx_hash(&self) -> Option<&str> {
        self.last_tx_hash.as_deref()
    }

    pub fn min_amount(&self) -> &'static str {
        self.config.min_amount
    }

    pub fn estimated_gas_price(&self) -> f64 {
        self.config.estimated_gas_price
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn validate_amount(&self, amount_human: &str) -> Result<(), SendError> {
        validation::validate_amount(amount_human, &self.config)
    }

    pub fn validate_address(&self, address: &str) -> Result<(), SendError> {
        validation::validate_address(address)
    }

    /// Advisory fee and total for the confirmation screen
    pub fn estimate_cost(&self, amount_human: &str) -> EstimatedCost {
        estimate_cost(amount_human, self.config.estimated_gas_price)
    }

    fn transition(&mut self, next: SendState) {
        debug!("Send {}: {:?} -> {:?}", self.token, self.state, next);
        self.state = next;
    }

    /// Send `amount_human` of this pipeline's token to `to_address`
    pub async fn send_transaction(
        &mut self,
        to_address: &str,
        amount_human: &str,
        network: &NetworkConfig,
    ) -> Result<SendReceipt, SendError> {
        self.last_error = None;
        self.last_tx_hash = None;

        let result = self.run(to_address, amount_human, network).await;

        match &result {
            Ok(receipt) => {
                self.last_tx_hash = Some(receipt.tx_hash.clone());
                self.transition(SendState::Succeeded);
            }
            Err(err) => {
                error!("Send {} failed: {}", self.token, err);
                self.last_error = Some(err.clone());
                self.transition(SendState::Failed);
            }
        }

        result
    }

    /// Same as [`send_transaction`](Self::send_transaction) for a request built elsewhere
    ///
    /// The request's token must match this pipeline's token.
    pub async fn send_request(
        &mut self,
        request: &TransferRequest,
        network: &NetworkConfig,
    ) -> Result<SendReceipt, SendError> {
        if request.token != self.token {
            return Err(SendError::TransactionFailed(format!(
                "Request for {} sent through the {} pipeline",
                request.token, self.token
            )));
        }
        self.send_transaction(&request.to_address, &request.amount_human, network)
            .await
    }

    async fn run(
        &mut self,
        to_address: &str,
        amount_human: &str,
        network: &NetworkConfig,
    ) -> Result<SendReceipt, SendError> {
        self.transition(SendState::Validating);
        self.validate_amount(amount_human)?;
        self.validate_address(to_address)?;

        let user_id = self.identity.current_user_id().ok_or(SendError::NotAuthenticated)?;
        let wallet = self.wallets.wallet().ok_or(SendError::WalletNotFound)?;

        self.transition(SendState::Preparing);
        let encrypt_key = self.keys.derive_encrypt_key(&user_id);
        let bearer_token = self.identity.bearer_token().await.ok_or(SendError::AuthFailed)?;
        let token_address = network.token_address(self.token)?.to_string();

        // Anything failing from here on is reported as a failed transaction
        let prepared = prepare_transfer(to_address, amount_human, self.config.decimals)?;
        let call = ContractCall::transfer(&token_address, prepared.calldata);
        let selector = call.selector()?.to_hex_string();
        let params = CallContractParams {
            encrypt_key,
            wallet,
            bearer_token,
            contract_address: token_address.clone(),
            calls: vec![call],
        };

        self.transition(SendState::Dispatching);
        info!(
            "Sending {} {} to {} on {} (contract {}, selector {})",
            amount_human, self.token, to_address, network.network, token_address, selector
        );
        let response = self.executor.call_contract(params).await?;
        let tx_hash = normalize_tx_hash(&response);
        info!("Transfer submitted: {}", tx_hash);

        let explorer_url = (tx_hash != crate::providers::PENDING_TX_HASH).then(|| network.tx_url(&tx_hash));

        Ok(SendReceipt {
            tx_hash,
            token: self.token,
            amount: amount_human.to_string(),
            to_address: to_address.to_string(),
            network: network.network,
            explorer_url,
            submitted_at: chrono::Utc::now(),
        })
    }
}
