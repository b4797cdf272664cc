use alloy::primitives::{Address, TxHash};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeployError {
    #[error("{field} not set in environment!")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Contract artifact error ({path}): {message}")]
    ArtifactError { path: String, message: String },

    #[error(transparent)]
    Rpc(#[from] alloy::transports::TransportError),

    #[error(transparent)]
    PendingTransaction(#[from] alloy::providers::PendingTransactionError),

    #[error("Provider error: {message}")]
    ProviderError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Router deployed at {router} (tx {tx_hash}) but the record was not saved: {source}")]
    RecordNotSaved {
        router: Address,
        tx_hash: TxHash,
        source: Box<DeployError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Artifact,
    Provider,
    Storage,
}

impl DeployError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DeployError::MissingConfigError { .. }
            | DeployError::InvalidConfigValueError { .. }
            | DeployError::ConfigError { .. }
            | DeployError::TomlError(_) => ErrorCategory::Configuration,
            DeployError::ArtifactError { .. } => ErrorCategory::Artifact,
            DeployError::Rpc(_)
            | DeployError::PendingTransaction(_)
            | DeployError::ProviderError { .. } => ErrorCategory::Provider,
            DeployError::IoError(_)
            | DeployError::SerializationError(_)
            | DeployError::RecordNotSaved { .. } => ErrorCategory::Storage,
        }
    }

    /// Whether the error was raised before anything was sent to the network.
    pub fn is_local(&self) -> bool {
        match self {
            DeployError::RecordNotSaved { .. } => false,
            _ => self.category() != ErrorCategory::Provider,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            DeployError::MissingConfigError { field } => {
                format!("Export {field} or pass it on the command line")
            }
            DeployError::InvalidConfigValueError { field, .. } => {
                format!("Check the value given for {field}")
            }
            DeployError::ConfigError { .. } | DeployError::TomlError(_) => {
                "Check the networks file and command line options".to_string()
            }
            DeployError::ArtifactError { .. } => {
                "Compile the router contract and point --artifact at its artifact JSON".to_string()
            }
            DeployError::Rpc(_) => {
                "Check the RPC endpoint is reachable and the deployer account is funded"
                    .to_string()
            }
            DeployError::PendingTransaction(_) => {
                "Look the transaction up on a block explorer before re-running".to_string()
            }
            DeployError::ProviderError { .. } => {
                "Inspect the transaction receipt; the constructor may have reverted".to_string()
            }
            DeployError::IoError(_) | DeployError::SerializationError(_) => {
                "Check that the output directory exists and is writable".to_string()
            }
            DeployError::RecordNotSaved { router, .. } => format!(
                "Do not redeploy: the router is live at {router}. \
                 Fix the output directory and record it by hand"
            ),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {self}"),
            ErrorCategory::Artifact => format!("Could not load the router bytecode: {self}"),
            ErrorCategory::Provider => format!("Deployment failed on the network: {self}"),
            ErrorCategory::Storage => format!("Could not save the deployment record: {self}"),
        }
    }
}

pub type Result<T> = std::result::Result<T, DeployError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_message_names_variable() {
        let err = DeployError::MissingConfigError {
            field: "FACTORY_ADDRESS".to_string(),
        };
        assert_eq!(err.to_string(), "FACTORY_ADDRESS not set in environment!");
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.is_local());
        assert!(err.recovery_suggestion().contains("FACTORY_ADDRESS"));
    }

    #[test]
    fn test_provider_errors_are_not_local() {
        let err = DeployError::ProviderError {
            message: "insufficient funds for gas * price + value".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Provider);
        assert!(!err.is_local());
        assert!(err
            .user_friendly_message()
            .starts_with("Deployment failed on the network"));
    }

    #[test]
    fn test_unsaved_record_is_never_local() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err = DeployError::RecordNotSaved {
            router: Address::repeat_byte(0x11),
            tx_hash: TxHash::repeat_byte(0x22),
            source: Box::new(DeployError::IoError(io)),
        };
        assert_eq!(err.category(), ErrorCategory::Storage);
        assert!(!err.is_local());
        assert!(err.to_string().contains(&Address::repeat_byte(0x11).to_checksum(None)));
        assert!(err.recovery_suggestion().starts_with("Do not redeploy"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
