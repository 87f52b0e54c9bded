use std::path::PathBuf;
use std::sync::Arc;

use ethers::providers::{
    Http, JsonRpcClient, Middleware, Provider, ProviderError,
};
use ethers::types::Address;
use ethers::utils::to_checksum;
use eyre::Context;
use semver::Version;
use tracing::{info, instrument};

pub use self::account::load_account;
use self::address::get_address;
use self::utils::prompt_text_handle_errors;
use crate::abis::{Erc20, Registry};
use crate::cli::{Args, Settings};
use crate::config::{
    DEFAULT_GOVERNANCE, DEFAULT_REGISTRY, DEFAULT_REWARDS, PLACEHOLDER_RELEASE,
};
use crate::deployment::Cmd;
use crate::types::{
    default_vault_name, default_vault_symbol, DeploymentMode, VaultParameters,
};
use crate::version_gate::gate;

mod account;
mod address;
mod utils;

#[cfg(test)]
pub mod testing;

/// Terminal seam: everything the operator sees or answers goes through here.
pub trait Prompter {
    /// Free text; an empty answer yields `default` when one is offered.
    fn text(&mut self, message: &str, default: Option<&str>)
        -> eyre::Result<String>;

    /// Yes/no question defaulting to no.
    fn confirm(&mut self, message: &str) -> eyre::Result<bool>;

    fn select(
        &mut self,
        message: &str,
        options: Vec<String>,
    ) -> eyre::Result<String>;

    fn password(&mut self, message: &str) -> eyre::Result<String>;

    fn notify(&mut self, message: &str);
}

pub struct InquirePrompter;

impl Prompter for InquirePrompter {
    fn text(
        &mut self,
        message: &str,
        default: Option<&str>,
    ) -> eyre::Result<String> {
        let mut prompt = inquire::Text::new(message);

        if let Some(default) = default {
            prompt = prompt.with_default(default);
        }

        Ok(prompt.prompt()?)
    }

    fn confirm(&mut self, message: &str) -> eyre::Result<bool> {
        Ok(inquire::Confirm::new(message).with_default(false).prompt()?)
    }

    fn select(
        &mut self,
        message: &str,
        options: Vec<String>,
    ) -> eyre::Result<String> {
        Ok(inquire::Select::new(message, options).prompt()?)
    }

    fn password(&mut self, message: &str) -> eyre::Result<String> {
        Ok(inquire::Password::new(message)
            .without_confirmation()
            .prompt()?)
    }

    fn notify(&mut self, message: &str) {
        println!("{message}");
    }
}

/// Read-only chain access needed while collecting the vault parameters.
#[allow(async_fn_in_trait)]
pub trait ChainView {
    /// `None` when the name has no ENS record.
    async fn resolve_name(&self, name: &str) -> eyre::Result<Option<Address>>;

    async fn token_symbol(&self, token: Address) -> eyre::Result<String>;

    async fn latest_release(&self, registry: Address) -> eyre::Result<Version>;
}

pub struct EthersChain<P = Http> {
    provider: Arc<Provider<P>>,
}

impl<P> EthersChain<P> {
    pub fn new(provider: Arc<Provider<P>>) -> Self {
        Self { provider }
    }
}

impl<P> ChainView for EthersChain<P>
where
    P: JsonRpcClient + 'static,
{
    async fn resolve_name(&self, name: &str) -> eyre::Result<Option<Address>> {
        match self.provider.resolve_name(name).await {
            // A resolver without an addr record answers with the zero address
            Ok(address) if address.is_zero() => Ok(None),
            Ok(address) => Ok(Some(address)),
            Err(ProviderError::EnsError(_) | ProviderError::EnsNotOwned(_)) => {
                Ok(None)
            }
            Err(err) => {
                Err(err).with_context(|| format!("Resolving ENS name {name}"))
            }
        }
    }

    async fn token_symbol(&self, token: Address) -> eyre::Result<String> {
        let symbol = Erc20::new(token, self.provider.clone())
            .symbol()
            .call()
            .await
            .with_context(|| format!("Reading symbol() of {token:?}"))?;

        Ok(symbol)
    }

    async fn latest_release(&self, registry: Address) -> eyre::Result<Version> {
        let release = Registry::new(registry, self.provider.clone())
            .latest_release()
            .call()
            .await
            .context("Reading latestRelease() from registry")?;

        release
            .parse()
            .with_context(|| format!("Registry release {release} is not semver"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseSource {
    /// Gate against 0.0.0 without touching the registry.
    Placeholder,
    Registry,
}

/// Prompts for any run setting not given on the command line or in the environment.
pub fn complete_args<P: Prompter>(
    prompter: &mut P,
    args: Args,
) -> eyre::Result<Settings> {
    let rpc_url = if let Some(rpc_url) = args.rpc_url {
        println!("Using RPC: {rpc_url}");
        rpc_url
    } else {
        prompt_text_handle_errors(prompter, "Rpc Url:")?
    };

    let keystore_dir = if let Some(keystore_dir) = args.keystore_dir {
        println!("Using keystores in: {}", keystore_dir.display());
        keystore_dir
    } else {
        PathBuf::from(prompter.text("Keystore directory:", None)?.trim())
    };

    let etherscan_api_key = if let Some(key) = args.etherscan_api_key {
        Some(key)
    } else {
        let key = prompter
            .text("Etherscan API key (leave empty to skip):", None)?;

        if key.trim().is_empty() {
            None
        } else {
            Some(key.trim().to_owned())
        }
    };

    Ok(Settings {
        rpc_url,
        keystore_dir,
        config: args.config,
        etherscan_api_key,
        contracts_dir: args.contracts_dir,
        vault_source: args.vault_source,
        live_release: args.live_release,
    })
}

/// Collects and confirms everything needed for one vault deployment.
///
/// Returns `Ok(None)` whenever the operator backs out or the package version
/// is older than the registry's latest release.
#[instrument(skip_all, fields(%package_version, ?signer))]
pub async fn run_interactive_session<P: Prompter, C: ChainView>(
    prompter: &mut P,
    chain: &C,
    package_version: &Version,
    signer: Address,
    release_source: ReleaseSource,
) -> eyre::Result<Option<Cmd>> {
    let registry =
        get_address(prompter, chain, "Vault Registry", Some(DEFAULT_REGISTRY))
            .await?;

    let latest_release = match release_source {
        ReleaseSource::Placeholder => PLACEHOLDER_RELEASE,
        ReleaseSource::Registry => chain.latest_release(registry).await?,
    };

    info!("Latest release is {latest_release}");

    let Some(mode) = gate(package_version, &latest_release).deployment_mode()
    else {
        prompter.notify("Cannot deploy Vault for old API version");
        return Ok(None);
    };

    let proceed = match mode {
        DeploymentMode::Release => prompter
            .confirm(&format!("Deploy {package_version} as new release"))?,
        DeploymentMode::Experimental => {
            prompter.confirm("Deploy Experimental Vault")?
        }
    };

    if !proceed {
        return Ok(None);
    }

    let publish_source = prompter.confirm("Verify source on etherscan?")?;

    let token = get_address(prompter, chain, "ERC20 Token", None).await?;
    let token_symbol = chain.token_symbol(token).await?;

    let signer_checksummed = to_checksum(&signer, None);

    let governance_default = if mode.uses_proxy() {
        signer_checksummed.as_str()
    } else {
        DEFAULT_GOVERNANCE
    };
    let governance = get_address(
        prompter,
        chain,
        "Yearn Governance",
        Some(governance_default),
    )
    .await?;

    let rewards =
        get_address(prompter, chain, "Rewards contract", Some(DEFAULT_REWARDS))
            .await?;

    let guardian = get_address(
        prompter,
        chain,
        "Vault Guardian",
        Some(signer_checksummed.as_str()),
    )
    .await?;

    let name = prompter.text(
        "Set description",
        Some(default_vault_name(&token_symbol).as_str()),
    )?;
    let symbol = prompter.text(
        "Set symbol",
        Some(default_vault_symbol(&token_symbol).as_str()),
    )?;

    let params = VaultParameters {
        version: package_version.clone(),
        token,
        token_symbol,
        governance,
        rewards,
        guardian,
        name,
        symbol,
    };

    prompter.notify(&params.to_string());

    if !prompter.confirm("Deploy New Vault")? {
        return Ok(None);
    }

    Ok(Some(Cmd {
        mode,
        publish_source,
        registry,
        params,
    }))
}
