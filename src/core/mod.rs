pub mod artifact;
pub mod orchestrator;

pub use crate::domain::model::{DeploymentOutcome, DeploymentPlan, DeploymentRecord};
pub use crate::domain::ports::{ChainClient, Storage};
pub use crate::utils::error::Result;
