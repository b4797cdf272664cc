#[cfg(feature = "cli")]
pub mod cli;
pub mod networks;

use crate::core::artifact::DEFAULT_ARTIFACT_PATH;
use crate::domain::model::{
    DeploymentRecord, GasOverrides, InputAddress, RouterArgs, FACTORY_ADDRESS, WETH_ADDRESS,
};
use crate::utils::error::{DeployError, Result};
use crate::utils::validation::{
    validate_min, validate_network_name, validate_path, validate_required_field, validate_url,
    Validate,
};
use std::time::Duration;
use url::Url;

pub use networks::{NetworkProfile, NetworksFile};

pub const RPC_URL: &str = "RPC_URL";
pub const PRIVATE_KEY: &str = "PRIVATE_KEY";
pub const DEFAULT_NETWORK: &str = "localhost";

const MIN_GAS_LIMIT: u64 = 21_000;

/// Everything one deployment run needs, resolved once at process entry.
#[derive(Debug, Clone, PartialEq)]
pub struct DeployConfig {
    pub network: String,
    pub factory_address: Option<String>,
    pub weth_address: Option<String>,
    pub rpc_url: Option<String>,
    pub chain_id: Option<u64>,
    pub artifact_path: String,
    pub output_dir: String,
    pub gas: Option<GasOverrides>,
    pub confirmation_timeout: Option<Duration>,
}

impl DeployConfig {
    pub fn new(network: impl Into<String>) -> Self {
        Self {
            network: network.into(),
            factory_address: None,
            weth_address: None,
            rpc_url: None,
            chain_id: None,
            artifact_path: DEFAULT_ARTIFACT_PATH.to_string(),
            output_dir: ".".to_string(),
            gas: None,
            confirmation_timeout: None,
        }
    }

    pub fn router_args(&self) -> Result<RouterArgs> {
        parse_router_args(&self.factory_address, &self.weth_address)
    }

    pub fn rpc_url(&self) -> Result<Url> {
        let rpc_url = validate_required_field(RPC_URL, &self.rpc_url)?;
        validate_url(RPC_URL, rpc_url)
    }

    pub fn record_file_name(&self) -> String {
        DeploymentRecord::file_name(&self.network)
    }
}

/// Factory is checked before WETH.
pub fn parse_router_args(factory: &Option<String>, weth: &Option<String>) -> Result<RouterArgs> {
    let factory = validate_required_field(FACTORY_ADDRESS, factory)?;
    let factory = InputAddress::parse(FACTORY_ADDRESS, factory)?;
    let weth = validate_required_field(WETH_ADDRESS, weth)?;
    let weth = InputAddress::parse(WETH_ADDRESS, weth)?;
    Ok(RouterArgs { factory, weth })
}

impl Validate for DeployConfig {
    fn validate(&self) -> Result<()> {
        validate_network_name("network", &self.network)?;
        validate_path("output_dir", &self.output_dir)?;
        validate_path("artifact", &self.artifact_path)?;

        if let Some(rpc_url) = &self.rpc_url {
            validate_url(RPC_URL, rpc_url)?;
        }

        if let Some(gas) = &self.gas {
            validate_min("gas_limit", gas.gas_limit, MIN_GAS_LIMIT)?;
            validate_min("gas_price", gas.gas_price, 1)?;
        }

        if self.confirmation_timeout.is_some_and(|t| t.is_zero()) {
            return Err(DeployError::InvalidConfigValueError {
                field: "confirmation_timeout".to_string(),
                value: "0".to_string(),
                reason: "Timeout must be at least one second".to_string(),
            });
        }

        tracing::debug!("Deployment configuration validation passed");
        Ok(())
    }
}

#[cfg(feature = "cli")]
pub use cli::CliConfig;
