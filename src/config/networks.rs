use crate::domain::model::{GasOverrides, FIXED_GAS_LIMIT, FIXED_GAS_PRICE_GWEI};
use crate::utils::error::Result;
use crate::utils::validation::{validate_network_name, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

static ENV_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is valid"));

/// Named network profiles, e.g.
///
/// ```toml
/// [networks.rise_testnet]
/// rpc_url = "${RISE_RPC_URL}"
/// chain_id = 11155931
/// fixed_gas = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworksFile {
    #[serde(default)]
    pub networks: BTreeMap<String, NetworkProfile>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkProfile {
    pub rpc_url: String,
    pub chain_id: Option<u64>,
    pub gas_limit: Option<u64>,
    pub gas_price_gwei: Option<u64>,
    #[serde(default)]
    pub fixed_gas: bool,
}

impl NetworkProfile {
    /// Checked only for the profile a run selects, so other profiles may keep
    /// placeholders whose variables are unset.
    pub fn validate_rpc_url(&self, network: &str) -> Result<()> {
        validate_url(&format!("networks.{network}.rpc_url"), &self.rpc_url)?;
        Ok(())
    }

    /// Any gas setting turns overrides on; unset halves come from the fixed profile.
    pub fn gas_overrides(&self) -> Option<GasOverrides> {
        if !self.fixed_gas && self.gas_limit.is_none() && self.gas_price_gwei.is_none() {
            return None;
        }
        Some(GasOverrides::new(
            self.gas_limit.unwrap_or(FIXED_GAS_LIMIT),
            self.gas_price_gwei.unwrap_or(FIXED_GAS_PRICE_GWEI),
        ))
    }
}

impl NetworksFile {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        let file = Self::from_toml_str(&content)?;
        tracing::debug!(
            "Loaded {} network profile(s) from {}",
            file.networks.len(),
            path.as_ref().display()
        );
        Ok(file)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::from_toml_str_with(content, |name| std::env::var(name).ok())
    }

    /// Parses after replacing `${VAR}` placeholders through `lookup`. Unknown
    /// placeholders are kept verbatim so validation reports them.
    pub fn from_toml_str_with<F>(content: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let processed = ENV_PLACEHOLDER.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            lookup(var_name).unwrap_or_else(|| format!("${{{}}}", var_name))
        });

        Ok(toml::from_str(&processed)?)
    }

    pub fn profile(&self, network: &str) -> Option<&NetworkProfile> {
        self.networks.get(network)
    }
}

impl Validate for NetworksFile {
    fn validate(&self) -> Result<()> {
        for name in self.networks.keys() {
            validate_network_name("networks", name)?;
        }
        Ok(())
    }
}
