pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{evm::EvmClient, storage::LocalStorage};
pub use config::{DeployConfig, NetworksFile};
pub use core::{artifact::ContractArtifact, orchestrator::DeploymentOrchestrator};
pub use domain::model::{DeploymentRecord, GasOverrides, InputAddress};
pub use utils::error::{DeployError, Result};
