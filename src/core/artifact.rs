use crate::domain::model::RouterArgs;
use crate::utils::error::{DeployError, Result};
use alloy::primitives::Bytes;
use alloy::sol_types::SolValue;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

pub const ROUTER_CONTRACT_NAME: &str = "UniswapV2Router02";
pub const DEFAULT_ARTIFACT_PATH: &str =
    "artifacts/contracts/UniswapV2Router02.sol/UniswapV2Router02.json";

/// Hardhat stores creation bytecode as a hex string, Foundry as `{ "object": "0x..." }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BytecodeField {
    Hex(String),
    Object { object: String },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArtifactFile {
    contract_name: Option<String>,
    bytecode: Option<BytecodeField>,
}

/// Pre-compiled creation bytecode of the router contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractArtifact {
    name: String,
    bytecode: Bytes,
}

impl ContractArtifact {
    pub fn new(name: impl Into<String>, bytecode: Bytes) -> Self {
        Self {
            name: name.into(),
            bytecode,
        }
    }

    /// Loads `.json` files as compiler artifacts and anything else as a raw hex dump.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let label = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| DeployError::ArtifactError {
            path: label.clone(),
            message: format!("cannot read file: {e}"),
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let artifact = if is_json {
            Self::from_artifact_json(&label, &content)?
        } else {
            Self::from_hex(&label, &content)?
        };

        tracing::debug!(
            "Loaded {} creation bytecode ({} bytes) from {}",
            artifact.name,
            artifact.bytecode.len(),
            label
        );
        Ok(artifact)
    }

    pub fn from_artifact_json(label: &str, content: &str) -> Result<Self> {
        let file: ArtifactFile =
            serde_json::from_str(content).map_err(|e| DeployError::ArtifactError {
                path: label.to_string(),
                message: format!("invalid artifact JSON: {e}"),
            })?;

        let hex = match file.bytecode {
            Some(BytecodeField::Hex(hex)) | Some(BytecodeField::Object { object: hex }) => hex,
            None => {
                return Err(DeployError::ArtifactError {
                    path: label.to_string(),
                    message: "artifact has no bytecode field".to_string(),
                })
            }
        };

        let name = file
            .contract_name
            .unwrap_or_else(|| ROUTER_CONTRACT_NAME.to_string());
        Ok(Self::new(name, decode_bytecode(label, &hex)?))
    }

    pub fn from_hex(label: &str, content: &str) -> Result<Self> {
        Ok(Self::new(ROUTER_CONTRACT_NAME, decode_bytecode(label, content)?))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytecode(&self) -> &Bytes {
        &self.bytecode
    }

    /// Creation bytecode followed by the ABI-encoded `(factory, weth)` constructor arguments.
    pub fn deployment_code(&self, args: &RouterArgs) -> Bytes {
        let encoded_args = (args.factory.address(), args.weth.address()).abi_encode_params();

        let mut code = Vec::with_capacity(self.bytecode.len() + encoded_args.len());
        code.extend_from_slice(&self.bytecode);
        code.extend_from_slice(&encoded_args);
        code.into()
    }
}

fn decode_bytecode(label: &str, hex: &str) -> Result<Bytes> {
    let hex = hex.trim();
    let error = |message: &str| DeployError::ArtifactError {
        path: label.to_string(),
        message: message.to_string(),
    };

    if hex.contains("__") {
        return Err(error("bytecode has unlinked library placeholders"));
    }

    let bytecode = Bytes::from_str(hex).map_err(|_| error("bytecode is not valid hex"))?;
    if bytecode.is_empty() {
        return Err(error("bytecode is empty; is the contract abstract?"));
    }
    Ok(bytecode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{InputAddress, FACTORY_ADDRESS, WETH_ADDRESS};
    use std::io::Write;

    fn router_args() -> RouterArgs {
        RouterArgs {
            factory: InputAddress::parse(
                FACTORY_ADDRESS,
                "0x1111111111111111111111111111111111111111",
            )
            .unwrap(),
            weth: InputAddress::parse(WETH_ADDRESS, "0x2222222222222222222222222222222222222222")
                .unwrap(),
        }
    }

    #[test]
    fn test_hardhat_artifact() {
        let json = r#"{
            "_format": "hh-sol-artifact-1",
            "contractName": "UniswapV2Router02",
            "abi": [],
            "bytecode": "0x6080604052",
            "deployedBytecode": "0x6080"
        }"#;
        let artifact = ContractArtifact::from_artifact_json("router.json", json).unwrap();
        assert_eq!(artifact.name(), "UniswapV2Router02");
        assert_eq!(artifact.bytecode().as_ref(), &[0x60, 0x80, 0x60, 0x40, 0x52]);
    }

    #[test]
    fn test_foundry_artifact() {
        let json = r#"{ "abi": [], "bytecode": { "object": "0x60806040", "linkReferences": {} } }"#;
        let artifact = ContractArtifact::from_artifact_json("out/Router.json", json).unwrap();
        assert_eq!(artifact.name(), ROUTER_CONTRACT_NAME);
        assert_eq!(artifact.bytecode().len(), 4);
    }

    #[test]
    fn test_rejects_unusable_bytecode() {
        let unlinked = r#"{ "bytecode": "0x6080__$d1e2f3a4b5c6d7e8f9a0b1c2d3e4f5a6b7$__6040" }"#;
        let empty = r#"{ "contractName": "IUniswapV2Router02", "bytecode": "0x" }"#;
        let missing = r#"{ "contractName": "UniswapV2Router02" }"#;

        for json in [unlinked, empty, missing, "not json"] {
            let err = ContractArtifact::from_artifact_json("router.json", json).unwrap_err();
            assert!(matches!(err, DeployError::ArtifactError { .. }), "{json}");
        }
        assert!(ContractArtifact::from_hex("router.bin", "0xzz").is_err());
    }

    #[test]
    fn test_from_file_reads_raw_hex() {
        let mut file = tempfile::Builder::new().suffix(".bin").tempfile().unwrap();
        writeln!(file, "  0x60806040  ").unwrap();

        let artifact = ContractArtifact::from_file(file.path()).unwrap();
        assert_eq!(artifact.bytecode().as_ref(), &[0x60, 0x80, 0x60, 0x40]);
    }

    #[test]
    fn test_deployment_code_appends_constructor_args() {
        let artifact = ContractArtifact::new(ROUTER_CONTRACT_NAME, Bytes::from(vec![0x60, 0x80]));
        let code = artifact.deployment_code(&router_args());

        assert_eq!(code.len(), 2 + 64);
        assert_eq!(&code[..2], &[0x60, 0x80]);
        assert_eq!(&code[2..14], &[0u8; 12]);
        assert_eq!(&code[14..34], &[0x11; 20]);
        assert_eq!(&code[34..46], &[0u8; 12]);
        assert_eq!(&code[46..66], &[0x22; 20]);
    }
}
