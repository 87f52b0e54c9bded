use std::path::PathBuf;

use ethers::types::Address;
use eyre::ContextCompat;
use tracing::{info, instrument};

use super::ContractSpec;

pub struct ForgeVerify {
    spec: ContractSpec,
    address: Address,
    root: Option<PathBuf>,
    chain: Option<u64>,
    etherscan_api_key: Option<String>,
}

impl ForgeVerify {
    pub fn new(spec: ContractSpec, address: Address) -> Self {
        Self {
            spec,
            address,
            root: None,
            chain: None,
            etherscan_api_key: None,
        }
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn with_chain(mut self, chain: u64) -> Self {
        self.chain = Some(chain);
        self
    }

    pub fn with_etherscan_api_key(
        mut self,
        etherscan_api_key: impl ToString,
    ) -> Self {
        self.etherscan_api_key = Some(etherscan_api_key.to_string());
        self
    }

    fn args(&self) -> eyre::Result<Vec<String>> {
        let root = self.root.as_ref().context("Missing root")?;
        let chain = self.chain.as_ref().context("Missing chain")?;
        let etherscan_api_key = self
            .etherscan_api_key
            .as_ref()
            .context("Missing etherscan api key")?;

        Ok(vec![
            "verify-contract".to_owned(),
            "--watch".to_owned(),
            "--flatten".to_owned(),
            "--root".to_owned(),
            root.display().to_string(),
            "--chain".to_owned(),
            chain.to_string(),
            "--etherscan-api-key".to_owned(),
            etherscan_api_key.clone(),
            format!("{:?}", self.address),
            self.spec.to_string(),
        ])
    }

    #[instrument(name = "forge_verify", skip_all, fields(address = ?self.address))]
    pub async fn run(&self) -> eyre::Result<()> {
        let mut cmd = tokio::process::Command::new("forge");
        cmd.args(self.args()?);

        info!("Verifying {} at {:?}", self.spec, self.address);

        let output = cmd.output().await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            eyre::bail!("forge verify failed: {}", stderr);
        }

        Ok(())
    }
}
