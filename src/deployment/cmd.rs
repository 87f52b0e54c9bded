use ethers::types::Address;

use crate::types::{DeploymentMode, VaultParameters};

/// Everything the operator confirmed during the interactive session.
#[derive(Debug, Clone)]
pub struct Cmd {
    pub mode: DeploymentMode,
    pub publish_source: bool,
    pub registry: Address,
    pub params: VaultParameters,
}
