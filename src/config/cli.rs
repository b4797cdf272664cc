use super::{
    parse_router_args, DeployConfig, NetworkProfile, NetworksFile, DEFAULT_NETWORK, PRIVATE_KEY,
    RPC_URL,
};
use crate::core::artifact::DEFAULT_ARTIFACT_PATH;
use crate::domain::model::{
    GasOverrides, RouterArgs, FACTORY_ADDRESS, FIXED_GAS_LIMIT, FIXED_GAS_PRICE_GWEI,
    WETH_ADDRESS,
};
use crate::utils::error::{DeployError, Result};
use crate::utils::logger::LogFormat;
use clap::Parser;
use std::time::Duration;

#[derive(Clone, Parser)]
#[command(name = "router-deployer")]
#[command(about = "Deploys the UniswapV2Router02 contract and records its address")]
pub struct CliConfig {
    /// Network identifier, used in the record and the output file name
    #[arg(long, env = "NETWORK", default_value = DEFAULT_NETWORK)]
    pub network: String,

    /// Address of the deployed UniswapV2Factory
    #[arg(long, env = FACTORY_ADDRESS)]
    pub factory_address: Option<String>,

    /// Address of the wrapped native token contract
    #[arg(long, env = WETH_ADDRESS)]
    pub weth_address: Option<String>,

    /// JSON-RPC endpoint; overrides the network profile
    #[arg(long, env = RPC_URL)]
    pub rpc_url: Option<String>,

    /// Hex private key of the deploying account
    #[arg(long, env = PRIVATE_KEY, hide_env_values = true)]
    pub private_key: Option<String>,

    /// TOML file with named network profiles
    #[arg(long)]
    pub networks: Option<String>,

    /// Compiled router artifact (Hardhat/Foundry JSON or raw hex)
    #[arg(long, default_value = DEFAULT_ARTIFACT_PATH)]
    pub artifact: String,

    #[arg(long, default_value = ".")]
    pub output_dir: String,

    /// Send with a fixed 6M gas limit and 100 gwei gas price
    #[arg(long)]
    pub fixed_gas: bool,

    #[arg(long)]
    pub gas_limit: Option<u64>,

    #[arg(long)]
    pub gas_price_gwei: Option<u64>,

    /// Give up waiting for the receipt after this many seconds
    #[arg(long)]
    pub confirmation_timeout: Option<u64>,

    /// Resolve signer and transaction without sending anything
    #[arg(long)]
    pub dry_run: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn gas_overrides(&self) -> Option<GasOverrides> {
        if !self.fixed_gas && self.gas_limit.is_none() && self.gas_price_gwei.is_none() {
            return None;
        }
        Some(GasOverrides::new(
            self.gas_limit.unwrap_or(FIXED_GAS_LIMIT),
            self.gas_price_gwei.unwrap_or(FIXED_GAS_PRICE_GWEI),
        ))
    }

    /// Lets `main` fail on a missing address before touching the networks file.
    pub fn router_args(&self) -> Result<RouterArgs> {
        parse_router_args(&self.factory_address, &self.weth_address)
    }

    /// Merges command line values over the profile named by `--network`.
    pub fn to_deploy_config(&self, networks: Option<&NetworksFile>) -> Result<DeployConfig> {
        let profile = networks.and_then(|file| file.profile(&self.network));

        if let (Some(profile), None) = (profile, &self.rpc_url) {
            profile.validate_rpc_url(&self.network)?;
        }

        if networks.is_some() && profile.is_none() && self.rpc_url.is_none() {
            return Err(DeployError::ConfigError {
                message: format!(
                    "network '{}' is not defined in the networks file and no --rpc-url was given",
                    self.network
                ),
            });
        }

        Ok(DeployConfig {
            network: self.network.clone(),
            factory_address: self.factory_address.clone(),
            weth_address: self.weth_address.clone(),
            rpc_url: self
                .rpc_url
                .clone()
                .or_else(|| profile.map(|p| p.rpc_url.clone())),
            chain_id: profile.and_then(|p| p.chain_id),
            artifact_path: self.artifact.clone(),
            output_dir: self.output_dir.clone(),
            gas: self
                .gas_overrides()
                .or_else(|| profile.and_then(NetworkProfile::gas_overrides)),
            confirmation_timeout: self.confirmation_timeout.map(Duration::from_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliConfig {
        let mut argv = vec!["router-deployer"];
        argv.extend_from_slice(args);
        CliConfig::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_explicit_gas_flags() {
        let cli = parse(&["--gas-limit", "8000000"]);
        let gas = cli.gas_overrides().unwrap();
        assert_eq!(gas.gas_limit, 8_000_000);
        assert_eq!(gas.gas_price, 100_000_000_000);

        assert_eq!(parse(&["--fixed-gas"]).gas_overrides(), Some(GasOverrides::fixed()));
        assert_eq!(parse(&[]).gas_overrides(), None);
    }

    #[test]
    fn test_cli_values_override_profile() {
        let networks = NetworksFile::from_toml_str_with(
            r#"
[networks.rise_testnet]
rpc_url = "https://testnet.riselabs.xyz"
chain_id = 11155931
fixed_gas = true
"#,
            |_| None,
        )
        .unwrap();

        let cli = parse(&[
            "--network",
            "rise_testnet",
            "--rpc-url",
            "http://127.0.0.1:8545",
            "--gas-price-gwei",
            "3",
        ]);
        let config = cli.to_deploy_config(Some(&networks)).unwrap();
        assert_eq!(config.rpc_url.as_deref(), Some("http://127.0.0.1:8545"));
        assert_eq!(config.chain_id, Some(11155931));
        assert_eq!(config.gas, Some(GasOverrides::new(FIXED_GAS_LIMIT, 3)));

        let from_profile = parse(&["--network", "rise_testnet"])
            .to_deploy_config(Some(&networks))
            .unwrap();
        assert_eq!(
            from_profile.rpc_url.as_deref(),
            Some("https://testnet.riselabs.xyz")
        );
        assert_eq!(from_profile.gas, Some(GasOverrides::fixed()));
    }

    const TWO_PROFILES: &str = r#"
[networks.rise_testnet]
rpc_url = "${RISE_RPC_URL}"
chain_id = 11155931

[networks.localhost]
rpc_url = "http://127.0.0.1:8545"
"#;

    #[test]
    fn test_unresolved_profile_does_not_block_another_network() {
        let networks = NetworksFile::from_toml_str_with(TWO_PROFILES, |_| None).unwrap();

        let config = parse(&[]).to_deploy_config(Some(&networks)).unwrap();
        assert_eq!(config.network, DEFAULT_NETWORK);
        assert_eq!(config.rpc_url.as_deref(), Some("http://127.0.0.1:8545"));

        let err = parse(&["--network", "rise_testnet"])
            .to_deploy_config(Some(&networks))
            .unwrap_err();
        assert!(matches!(
            err,
            DeployError::InvalidConfigValueError { field, .. }
                if field == "networks.rise_testnet.rpc_url"
        ));

        let overridden = parse(&[
            "--network",
            "rise_testnet",
            "--rpc-url",
            "http://127.0.0.1:9545",
        ])
        .to_deploy_config(Some(&networks))
        .unwrap();
        assert_eq!(overridden.rpc_url.as_deref(), Some("http://127.0.0.1:9545"));
        assert_eq!(overridden.chain_id, Some(11155931));
    }

    #[test]
    fn test_router_args_name_the_missing_variable() {
        let cli = CliConfig {
            factory_address: None,
            weth_address: None,
            ..parse(&[])
        };
        match cli.router_args() {
            Err(DeployError::MissingConfigError { field }) => assert_eq!(field, FACTORY_ADDRESS),
            Err(other) => panic!("unexpected error: {other:?}"),
            Ok(_) => panic!("missing factory should be rejected"),
        }

        let cli = CliConfig {
            factory_address: Some("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed".to_string()),
            weth_address: None,
            ..parse(&[])
        };
        match cli.router_args() {
            Err(DeployError::MissingConfigError { field }) => assert_eq!(field, WETH_ADDRESS),
            Err(other) => panic!("unexpected error: {other:?}"),
            Ok(_) => panic!("missing weth should be rejected"),
        }
    }

    #[test]
    fn test_unknown_network_without_rpc_url() {
        let networks = NetworksFile::default();
        let err = parse(&["--network", "sepolia"])
            .to_deploy_config(Some(&networks))
            .unwrap_err();
        assert!(matches!(err, DeployError::ConfigError { .. }));
    }
}
