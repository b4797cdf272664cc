use crate::config::PRIVATE_KEY;
use crate::domain::model::{DeploymentRequest, PendingDeployment};
use crate::domain::ports::ChainClient;
use crate::utils::error::{DeployError, Result};
use alloy::network::{EthereumWallet, ReceiptResponse, TransactionBuilder};
use alloy::primitives::{Address, U256};
use alloy::providers::{DynProvider, PendingTransactionBuilder, Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::signers::local::PrivateKeySigner;
use async_trait::async_trait;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

const REQUIRED_CONFIRMATIONS: u64 = 1;

/// `ChainClient` backed by an HTTP JSON-RPC provider and a local private key.
pub struct EvmClient {
    provider: DynProvider,
    signer: Address,
    confirmation_timeout: Option<Duration>,
}

impl EvmClient {
    /// Builds the provider with the recommended fillers (nonce, chain id, gas) and a
    /// wallet for `private_key`. Nothing is sent until the first call.
    pub fn connect(rpc_url: Url, private_key: &str) -> Result<Self> {
        let signer = PrivateKeySigner::from_str(private_key.trim()).map_err(|e| {
            DeployError::InvalidConfigValueError {
                field: PRIVATE_KEY.to_string(),
                value: "<redacted>".to_string(),
                reason: e.to_string(),
            }
        })?;
        let address = signer.address();

        tracing::debug!("Connecting to {} as {}", rpc_url, address);
        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_http(rpc_url)
            .erased();

        Ok(Self {
            provider,
            signer: address,
            confirmation_timeout: None,
        })
    }

    pub fn with_confirmation_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.confirmation_timeout = timeout;
        self
    }

    pub async fn chain_id(&self) -> Result<u64> {
        Ok(self.provider.get_chain_id().await?)
    }

    /// Guards against a networks file entry pointing at the wrong chain.
    pub async fn ensure_chain_id(&self, expected: u64) -> Result<()> {
        let actual = self.chain_id().await?;
        if actual != expected {
            return Err(DeployError::ConfigError {
                message: format!("RPC endpoint reports chain id {actual}, expected {expected}"),
            });
        }
        tracing::debug!("Chain id {} confirmed", actual);
        Ok(())
    }
}

#[async_trait]
impl ChainClient for EvmClient {
    async fn signer_address(&self) -> Result<Address> {
        Ok(self.signer)
    }

    async fn balance(&self, account: Address) -> Result<U256> {
        tracing::debug!("Getting balance of account: {account:?}");
        Ok(self.provider.get_balance(account).await?)
    }

    async fn submit_deployment(&self, request: &DeploymentRequest) -> Result<PendingDeployment> {
        let mut tx = TransactionRequest::default()
            .with_from(self.signer)
            .with_deploy_code(request.init_code.clone());

        if let Some(gas) = request.gas {
            tx = tx
                .with_gas_limit(gas.gas_limit)
                .with_gas_price(gas.gas_price);
        }

        let pending = self.provider.send_transaction(tx).await?;
        tracing::debug!(
            "Deployment transaction is pending with tx_hash: {:?}",
            pending.tx_hash()
        );

        Ok(PendingDeployment {
            tx_hash: *pending.tx_hash(),
        })
    }

    async fn wait_for_confirmation(&self, pending: &PendingDeployment) -> Result<Address> {
        let receipt = PendingTransactionBuilder::new(self.provider.root().clone(), pending.tx_hash)
            .with_required_confirmations(REQUIRED_CONFIRMATIONS)
            .with_timeout(self.confirmation_timeout)
            .get_receipt()
            .await?;

        if !receipt.status() {
            return Err(DeployError::ProviderError {
                message: format!(
                    "deployment transaction {:?} reverted in block {:?}",
                    pending.tx_hash,
                    receipt.block_number()
                ),
            });
        }

        receipt
            .contract_address()
            .ok_or_else(|| DeployError::ProviderError {
                message: format!(
                    "receipt for {:?} has no contract address",
                    pending.tx_hash
                ),
            })
    }
}
