use crate::utils::error::{DeployError, Result};
use alloy::primitives::{Address, Bytes, TxHash, U256};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const FACTORY_ADDRESS: &str = "FACTORY_ADDRESS";
pub const WETH_ADDRESS: &str = "WETH_ADDRESS";

pub const FIXED_GAS_LIMIT: u64 = 6_000_000;
pub const FIXED_GAS_PRICE_GWEI: u64 = 100;
pub const WEI_PER_GWEI: u128 = 1_000_000_000;

/// An account address together with the exact text it was configured as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputAddress {
    address: Address,
    text: String,
}

impl InputAddress {
    /// Parses a `0x`-prefixed, 20-byte hex address. Mixed-case input must carry a
    /// valid EIP-55 checksum; all-lowercase and all-uppercase input is accepted as is.
    pub fn parse(field: &str, value: &str) -> Result<Self> {
        let text = value.trim();
        let invalid = |reason: String| DeployError::InvalidConfigValueError {
            field: field.to_string(),
            value: value.to_string(),
            reason,
        };

        let Some(hex) = text.strip_prefix("0x") else {
            return Err(invalid("address must start with 0x".to_string()));
        };
        if hex.len() != 40 {
            return Err(invalid(format!(
                "address must be 40 hex characters, got {}",
                hex.len()
            )));
        }
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid("address contains non-hex characters".to_string()));
        }

        let mixed_case = hex.chars().any(|c| c.is_ascii_lowercase())
            && hex.chars().any(|c| c.is_ascii_uppercase());
        let address = if mixed_case {
            Address::parse_checksummed(text, None)
                .map_err(|e| invalid(format!("EIP-55 checksum mismatch: {e}")))?
        } else {
            Address::from_str(text).map_err(|e| invalid(e.to_string()))?
        };

        if address.is_zero() {
            return Err(invalid("zero address is not a deployed contract".to_string()));
        }

        Ok(Self {
            address,
            text: text.to_string(),
        })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for InputAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Router constructor arguments, in ABI order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterArgs {
    pub factory: InputAddress,
    pub weth: InputAddress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasOverrides {
    pub gas_limit: u64,
    /// Legacy gas price in wei.
    pub gas_price: u128,
}

impl GasOverrides {
    pub fn new(gas_limit: u64, gas_price_gwei: u64) -> Self {
        Self {
            gas_limit,
            gas_price: u128::from(gas_price_gwei) * WEI_PER_GWEI,
        }
    }

    /// The fixed 6M gas / 100 gwei profile used on networks whose fee market
    /// breaks estimation.
    pub fn fixed() -> Self {
        Self::new(FIXED_GAS_LIMIT, FIXED_GAS_PRICE_GWEI)
    }
}

/// A contract-creation transaction ready to be signed and submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentRequest {
    pub init_code: Bytes,
    pub gas: Option<GasOverrides>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingDeployment {
    pub tx_hash: TxHash,
}

/// Everything decided before a transaction is sent.
#[derive(Debug, Clone)]
pub struct DeploymentPlan {
    pub network: String,
    pub deployer: Address,
    pub balance: U256,
    pub args: RouterArgs,
    pub request: DeploymentRequest,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRecord {
    pub network: String,
    pub router: String,
    pub factory: String,
    pub weth: String,
    pub deployer: String,
    pub timestamp: String,
}

impl DeploymentRecord {
    pub fn new(
        network: &str,
        router: Address,
        args: &RouterArgs,
        deployer: Address,
        deployed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            network: network.to_string(),
            router: router.to_checksum(None),
            factory: args.factory.as_str().to_string(),
            weth: args.weth.as_str().to_string(),
            deployer: deployer.to_checksum(None),
            timestamp: deployed_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    pub fn file_name(network: &str) -> String {
        format!("deployment-router-{network}.json")
    }

    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Debug, Clone)]
pub struct DeploymentOutcome {
    pub record: DeploymentRecord,
    pub tx_hash: TxHash,
    pub output_path: String,
}
