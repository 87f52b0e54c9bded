use std::sync::Arc;

use clap::Parser;
use cli::Args;
use ethers::providers::{Http, Middleware, Provider};
use ethers::signers::Signer;
use ethers::types::Chain;
use ethers::utils::to_checksum;
use indicatif::ProgressStyle;
use interactive::{
    load_account, run_interactive_session, EthersChain, InquirePrompter,
    ReleaseSource,
};
use tracing_error::ErrorLayer;
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::PackageConfig;
use crate::deployment::{run_deployment, DeploymentContext};

pub mod abis;
pub mod ethers_utils;
pub mod forge_utils;
pub mod serde_utils;

mod cli;
mod config;
mod deployment;
mod interactive;
mod types;
mod version_gate;

async fn start() -> eyre::Result<()> {
    let mut prompter = InquirePrompter;

    let settings = interactive::complete_args(&mut prompter, Args::parse())?;

    let provider =
        Arc::new(Provider::<Http>::try_from(settings.rpc_url.as_str())?);
    let chain_id = provider.get_chainid().await?.as_u64();

    let network = Chain::try_from(chain_id)
        .map(|chain| chain.to_string())
        .unwrap_or_else(|_| format!("chain {chain_id}"));
    println!("You are using the '{network}' network");

    let (account_name, wallet) =
        load_account(&mut prompter, &settings.keystore_dir)?;
    let wallet = wallet.with_chain_id(chain_id);
    println!(
        "You are using: '{account_name}' [{}]",
        to_checksum(&wallet.address(), None)
    );

    let package: PackageConfig =
        serde_utils::read_deserialize(&settings.config).await?;

    let release_source = if settings.live_release {
        ReleaseSource::Registry
    } else {
        ReleaseSource::Placeholder
    };

    let chain = EthersChain::new(provider.clone());

    let Some(cmd) = run_interactive_session(
        &mut prompter,
        &chain,
        &package.version,
        wallet.address(),
        release_source,
    )
    .await?
    else {
        return Ok(());
    };

    let context =
        DeploymentContext::new(provider, wallet, chain_id, &settings).await?;

    run_deployment(&context, &cmd).await
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    dotenv::dotenv().ok();

    let indicatif_layer = IndicatifLayer::new().with_progress_style(
        ProgressStyle::with_template(
            "{spinner:.green} {span_name}{{{span_fields}}} {elapsed}",
        )?,
    );

    let filter = EnvFilter::from_default_env();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(indicatif_layer.get_stderr_writer())
                .with_filter(filter),
        )
        .with(indicatif_layer)
        .with(ErrorLayer::default())
        .init();

    match start().await {
        Ok(()) => Ok(()),
        Err(err) => {
            tracing::error!("{:?}", err);
            std::process::exit(1)
        }
    }
}
