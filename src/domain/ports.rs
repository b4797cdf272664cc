use crate::domain::model::{DeploymentRequest, PendingDeployment};
use crate::utils::error::Result;
use alloy::primitives::{Address, U256};
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    /// Writes `data` to `path`, replacing any existing file, and returns the full path written.
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

/// The signing, submitting side of a chain connection.
#[async_trait]
pub trait ChainClient: Send + Sync {
    async fn signer_address(&self) -> Result<Address>;
    async fn balance(&self, account: Address) -> Result<U256>;
    async fn submit_deployment(&self, request: &DeploymentRequest) -> Result<PendingDeployment>;
    /// Resolves with the created contract's address once the transaction is confirmed.
    async fn wait_for_confirmation(&self, pending: &PendingDeployment) -> Result<Address>;
}
