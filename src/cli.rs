use std::path::PathBuf;

use clap::Parser;
use reqwest::Url;

pub mod private_key;

pub use private_key::PrivateKey;

pub const DEFAULT_PACKAGE_CONFIG: &str = "ethpm-config.yaml";

#[derive(Debug, Clone, Parser)]
#[clap(rename_all = "kebab-case")]
pub struct Args {
    /// The RPC Url of the network to deploy to
    #[clap(short, long, env)]
    pub rpc_url: Option<Url>,

    /// Directory holding the encrypted keystore files to choose the deployer from
    #[clap(short, long, env)]
    pub keystore_dir: Option<PathBuf>,

    /// Path to the package configuration (must contain `version`)
    #[clap(short, long, env, default_value = DEFAULT_PACKAGE_CONFIG)]
    pub config: PathBuf,

    /// The etherscan API key to use for source verification
    #[clap(short, long, env)]
    pub etherscan_api_key: Option<String>,

    /// Root of the forge project containing the Vault contract
    #[clap(long, env, default_value = ".")]
    pub contracts_dir: PathBuf,

    /// Source file of the Vault contract, relative to the contracts dir
    ///
    /// Only needed when more than one contract in the project is named `Vault`
    #[clap(long, env)]
    pub vault_source: Option<PathBuf>,

    /// Gate against the registry's `latestRelease()` instead of 0.0.0
    #[clap(long, env)]
    pub live_release: bool,
}

/// Run configuration once every missing argument has been prompted for.
#[derive(Debug, Clone)]
pub struct Settings {
    pub rpc_url: Url,
    pub keystore_dir: PathBuf,
    pub config: PathBuf,
    pub etherscan_api_key: Option<String>,
    pub contracts_dir: PathBuf,
    pub vault_source: Option<PathBuf>,
    pub live_release: bool,
}
