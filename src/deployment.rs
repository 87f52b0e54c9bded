use ethers::abi::Token;
use ethers::contract::{parse_log, EthEvent};
use ethers::types::{Address, TransactionReceipt};
use ethers::utils::to_checksum;
use eyre::{bail, ContextCompat};
use tracing::{info, instrument};

use crate::abis::{NewExperimentalVaultFilter, REGISTRY_ABI};
use crate::ethers_utils::TransactionBuilder;
use crate::forge_utils::ForgeInspectAbi;
use crate::types::DeploymentMode;

pub mod cmd;
pub mod deployment_context;

pub use self::cmd::Cmd;
pub use self::deployment_context::{DeploymentContext, RpcSigner};

pub const VAULT_CONTRACT: &str = "Vault";

/// Positional arguments for whichever vault entry point the mode calls.
#[derive(Debug, Clone, PartialEq)]
pub enum VaultCall {
    /// `Registry.newExperimentalVault(token, governance, guardian, rewards, name, symbol)`
    NewExperimentalVault(Vec<Token>),
    /// `Vault.initialize(token, governance, rewards, name, symbol[, guardian])`
    Initialize(Vec<Token>),
}

pub fn assemble_call(cmd: &Cmd, signer: Address) -> VaultCall {
    let params = &cmd.params;

    let mut args = vec![
        Token::Address(params.token),
        Token::Address(params.governance),
        Token::Address(params.rewards),
        Token::String(params.name_override()),
        Token::String(params.symbol_override()),
    ];

    match cmd.mode {
        DeploymentMode::Experimental => {
            // The registry always takes a guardian, even when it is the signer
            args.insert(2, Token::Address(params.guardian));
            VaultCall::NewExperimentalVault(args)
        }
        DeploymentMode::Release => {
            // initialize() defaults the guardian to msg.sender
            if params.guardian != signer {
                args.push(Token::Address(params.guardian));
            }
            VaultCall::Initialize(args)
        }
    }
}

/// Reads the new vault out of the registry's `NewExperimentalVault` event.
pub fn experimental_vault_from_receipt(
    receipt: &TransactionReceipt,
    registry: Address,
) -> eyre::Result<Address> {
    receipt
        .logs
        .iter()
        .filter(|log| log.address == registry)
        .find_map(|log| {
            parse_log::<NewExperimentalVaultFilter>(log.clone()).ok()
        })
        .map(|event| event.vault)
        .with_context(|| {
            format!(
                "No {} event from registry in {:?}",
                NewExperimentalVaultFilter::name(),
                receipt.transaction_hash
            )
        })
}

#[instrument(skip(context, args))]
async fn deploy_experimental_vault(
    context: &DeploymentContext,
    registry: Address,
    args: Vec<Token>,
) -> eyre::Result<Address> {
    let receipt = TransactionBuilder::default()
        .context(context)
        .signer(context.rpc_signer.clone())
        .abi(REGISTRY_ABI.clone())
        .function_name("newExperimentalVault")
        .args(args)
        .to(registry)
        .build()?
        .send()
        .await?;

    let vault = experimental_vault_from_receipt(&receipt, registry)?;

    info!("Registry created experimental vault {vault:?}");

    Ok(vault)
}

#[instrument(skip(context, args))]
async fn deploy_vault_release(
    context: &DeploymentContext,
    publish_source: bool,
    args: Vec<Token>,
) -> eyre::Result<Address> {
    let vault_spec = context.vault_spec();

    let output = context
        .forge_create(vault_spec.clone())
        .with_verify(publish_source)
        .run()
        .await?;

    info!(
        "Vault deployed by {:?} in {:?}",
        output.deployer, output.transaction_hash
    );

    let vault_abi = ForgeInspectAbi::new(vault_spec)
        .with_cwd(&context.contracts_dir)
        .run()
        .await?;

    TransactionBuilder::default()
        .context(context)
        .signer(context.rpc_signer.clone())
        .abi(vault_abi)
        .function_name("initialize")
        .args(args)
        .to(output.deployed_to)
        .build()?
        .send()
        .await?;

    Ok(output.deployed_to)
}

#[instrument(skip_all, fields(mode = %cmd.mode, registry = ?cmd.registry))]
pub async fn run_deployment(
    context: &DeploymentContext,
    cmd: &Cmd,
) -> eyre::Result<()> {
    if cmd.publish_source && context.etherscan_api_key.is_none() {
        bail!("Verifying source on etherscan needs an etherscan api key");
    }

    match assemble_call(cmd, context.signer_address()) {
        VaultCall::NewExperimentalVault(args) => {
            let vault =
                deploy_experimental_vault(context, cmd.registry, args).await?;

            if cmd.publish_source {
                context
                    .forge_verify(context.vault_spec(), vault)?
                    .run()
                    .await?;
            }

            println!(
                "Experimental Vault deployed [{}]",
                to_checksum(&vault, None)
            );
            println!("    NOTE: Vault is not registered in Registry!");
        }
        VaultCall::Initialize(args) => {
            let vault =
                deploy_vault_release(context, cmd.publish_source, args).await?;

            println!(
                "New Vault Release deployed [{}]",
                to_checksum(&vault, None)
            );
            println!(
                "    NOTE: Vault is not registered in Registry, please register!"
            );
        }
    }

    Ok(())
}
