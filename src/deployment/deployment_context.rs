use std::path::PathBuf;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use ethers::prelude::SignerMiddleware;
use ethers::providers::{Http, Middleware, Provider};
use ethers::signers::{LocalWallet, Signer};
use ethers::types::Address;
use eyre::ContextCompat;
use reqwest::Url;

use crate::cli::{PrivateKey, Settings};
use crate::deployment::VAULT_CONTRACT;
use crate::forge_utils::{ContractSpec, ForgeCreate, ForgeVerify};

// TODO: Allow for different wallet kinds (hardware wallets) once forge create
//       no longer needs the raw private key
pub type RpcSigner = Arc<SignerMiddleware<Provider<Http>, LocalWallet>>;

#[derive(Debug)]
pub struct DeploymentContext {
    pub contracts_dir: PathBuf,
    pub vault_source: Option<PathBuf>,
    pub chain_id: u64,
    pub nonce: AtomicU64,
    pub private_key: PrivateKey,
    pub rpc_url: Url,
    pub rpc_signer: RpcSigner,
    pub etherscan_api_key: Option<String>,
}

impl DeploymentContext {
    pub async fn new(
        provider: Arc<Provider<Http>>,
        wallet: LocalWallet,
        chain_id: u64,
        settings: &Settings,
    ) -> eyre::Result<Self> {
        let private_key = PrivateKey::from_wallet(&wallet)?;
        let wallet_address = wallet.address();

        let signer = SignerMiddleware::new(provider.as_ref().clone(), wallet);

        let nonce = signer.get_transaction_count(wallet_address, None).await?;

        Ok(Self {
            contracts_dir: settings.contracts_dir.clone(),
            vault_source: settings.vault_source.clone(),
            chain_id,
            nonce: AtomicU64::new(nonce.as_u64()),
            private_key,
            rpc_url: settings.rpc_url.clone(),
            rpc_signer: Arc::new(signer),
            etherscan_api_key: settings.etherscan_api_key.clone(),
        })
    }

    pub fn next_nonce(&self) -> u64 {
        self.nonce.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
    }

    pub fn signer_address(&self) -> Address {
        self.rpc_signer.address()
    }

    pub fn vault_spec(&self) -> ContractSpec {
        let spec = ContractSpec::name(VAULT_CONTRACT);

        match self.vault_source.as_ref() {
            Some(source) => spec.with_path(source),
            None => spec,
        }
    }

    pub fn forge_create(&self, contract_spec: ContractSpec) -> ForgeCreate {
        let mut forge_create = ForgeCreate::new(contract_spec)
            .with_cwd(&self.contracts_dir)
            .with_private_key(self.private_key.clone())
            .with_rpc_url(self.rpc_url.to_string())
            .with_override_nonce(self.next_nonce());

        if let Some(etherscan_api_key) = self.etherscan_api_key.as_ref() {
            forge_create = forge_create
                .with_verification_api_key(etherscan_api_key.clone());
        }

        forge_create
    }

    pub fn forge_verify(
        &self,
        contract_spec: ContractSpec,
        address: Address,
    ) -> eyre::Result<ForgeVerify> {
        let etherscan_api_key = self
            .etherscan_api_key
            .as_ref()
            .context("Source verification needs an etherscan api key")?;

        Ok(ForgeVerify::new(contract_spec, address)
            .with_root(&self.contracts_dir)
            .with_chain(self.chain_id)
            .with_etherscan_api_key(etherscan_api_key))
    }
}
