use crate::config::DeployConfig;
use crate::core::artifact::ContractArtifact;
use crate::core::{ChainClient, Storage};
use crate::domain::model::{DeploymentOutcome, DeploymentPlan, DeploymentRecord, DeploymentRequest};
use crate::utils::error::{DeployError, Result};
use crate::utils::validation::Validate;
use alloy::primitives::utils::format_ether;
use chrono::Utc;

/// Runs one router deployment: validate, resolve the signer, submit, confirm, record.
/// Each call submits at most one transaction and never retries.
pub struct DeploymentOrchestrator<C: ChainClient, S: Storage> {
    client: C,
    storage: S,
    artifact: ContractArtifact,
}

impl<C: ChainClient, S: Storage> DeploymentOrchestrator<C, S> {
    pub fn new(client: C, storage: S, artifact: ContractArtifact) -> Self {
        Self {
            client,
            storage,
            artifact,
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Everything up to, but not including, submission.
    pub async fn plan(&self, config: &DeployConfig) -> Result<DeploymentPlan> {
        let args = config.router_args()?;
        config.validate()?;

        let deployer = self.client.signer_address().await?;
        tracing::info!(
            "Deploying {} with account: {}",
            self.artifact.name(),
            deployer
        );

        let balance = self.client.balance(deployer).await?;
        tracing::info!("Account balance: {} ({} ETH)", balance, format_ether(balance));

        tracing::info!("--- Deploying {} on {} ---", self.artifact.name(), config.network);
        tracing::info!("Factory: {}", args.factory);
        tracing::info!("WETH: {}", args.weth);

        match config.gas {
            Some(gas) => tracing::info!(
                "Gas overrides: limit {}, price {} wei",
                gas.gas_limit,
                gas.gas_price
            ),
            None => tracing::debug!("No gas overrides, provider estimates gas"),
        }

        let request = DeploymentRequest {
            init_code: self.artifact.deployment_code(&args),
            gas: config.gas,
        };

        Ok(DeploymentPlan {
            network: config.network.clone(),
            deployer,
            balance,
            args,
            request,
        })
    }

    pub async fn run(&self, config: &DeployConfig) -> Result<DeploymentOutcome> {
        let plan = self.plan(config).await?;

        let pending = self.client.submit_deployment(&plan.request).await?;
        tracing::info!("Deployment transaction sent: {:?}", pending.tx_hash);

        let router = self.client.wait_for_confirmation(&pending).await?;
        tracing::info!("✅ {} deployed to: {}", self.artifact.name(), router);

        let record = DeploymentRecord::new(
            &plan.network,
            router,
            &plan.args,
            plan.deployer,
            Utc::now(),
        );
        let output_path = self
            .save_record(&record)
            .await
            .map_err(|e| DeployError::RecordNotSaved {
                router,
                tx_hash: pending.tx_hash,
                source: Box::new(e),
            })?;
        tracing::info!("📁 Deployment info saved to {}", output_path);

        Ok(DeploymentOutcome {
            record,
            tx_hash: pending.tx_hash,
            output_path,
        })
    }

    async fn save_record(&self, record: &DeploymentRecord) -> Result<String> {
        let json = record.to_pretty_json()?;
        self.storage
            .write_file(&DeploymentRecord::file_name(&record.network), json.as_bytes())
            .await
    }
}
