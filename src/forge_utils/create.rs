use std::path::{Path, PathBuf};

use ethers::types::{Address, H256};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::common::ContractSpec;
use crate::cli::PrivateKey;

#[derive(Debug)]
pub struct ForgeCreate {
    cwd: Option<PathBuf>,
    contract_spec: ContractSpec,
    private_key: Option<PrivateKey>,
    rpc_url: Option<String>,
    override_nonce: Option<u64>,
    verification_api_key: Option<String>,
    verify: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgeOutput {
    pub deployer: Address,
    pub deployed_to: Address,
    pub transaction_hash: H256,
}

impl ForgeCreate {
    pub fn new(contract_spec: ContractSpec) -> Self {
        Self {
            cwd: None,
            contract_spec,
            private_key: None,
            rpc_url: None,
            override_nonce: None,
            verification_api_key: None,
            verify: false,
        }
    }

    /// Passes `--verify`; only effective together with an API key.
    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    pub fn with_verification_api_key(
        mut self,
        verification_api_key: impl ToString,
    ) -> Self {
        self.verification_api_key = Some(verification_api_key.to_string());
        self
    }

    pub fn with_cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_owned());
        self
    }

    pub fn with_override_nonce(mut self, override_nonce: u64) -> Self {
        self.override_nonce = Some(override_nonce);
        self
    }

    pub fn with_private_key(mut self, private_key: PrivateKey) -> Self {
        self.private_key = Some(private_key);
        self
    }

    pub fn with_rpc_url(mut self, rpc_url: String) -> Self {
        self.rpc_url = Some(rpc_url);
        self
    }

    fn args(&self) -> Vec<String> {
        let mut args =
            vec!["create".to_owned(), self.contract_spec.to_string()];

        if let Some(private_key) = &self.private_key {
            args.push("--private-key".to_owned());
            args.push(format!("{private_key:#}"));
        }

        if let Some(rpc_url) = &self.rpc_url {
            args.push("--rpc-url".to_owned());
            args.push(rpc_url.clone());
        }

        if let Some(nonce) = self.override_nonce {
            args.push("--nonce".to_owned());
            args.push(nonce.to_string());
        }

        if self.verify {
            if let Some(verification_api_key) = &self.verification_api_key {
                args.push("--etherscan-api-key".to_owned());
                args.push(verification_api_key.clone());
                args.push("--verify".to_owned());
            }
        }

        args.push("--json".to_owned());

        args
    }

    #[instrument(name = "forge_create", skip_all, fields(contract = %self.contract_spec))]
    pub async fn run(&self) -> eyre::Result<ForgeOutput> {
        let mut cmd = tokio::process::Command::new("forge");

        if let Some(cwd) = &self.cwd {
            cmd.current_dir(cwd);
        }

        cmd.args(self.args());

        info!(
            "Creating {} (nonce = {:?}, verify = {})",
            self.contract_spec, self.override_nonce, self.verify
        );

        let output = cmd.output().await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            eyre::bail!("forge create failed: {}", stderr);
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let output = parse_output(&stdout)?;

        info!("Created: {output:?}");

        Ok(output)
    }
}

fn parse_output(stdout: &str) -> eyre::Result<ForgeOutput> {
    Ok(serde_json::from_str(strip_non_json(stdout))?)
}

fn strip_non_json(s: &str) -> &str {
    if let Some(last_closing_brace) = s.rfind('}') {
        &s[..=last_closing_brace]
    } else {
        s
    }
}
