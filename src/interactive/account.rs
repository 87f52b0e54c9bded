use std::path::Path;

use ethers::signers::LocalWallet;
use eyre::{bail, Context};
use tracing::instrument;

use super::Prompter;

/// Names of the keystore files (`<name>.json`) in `dir`, sorted.
pub fn list_accounts(dir: &Path) -> eyre::Result<Vec<String>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Listing keystores in {}", dir.display()))?;

    let mut names = vec![];

    for entry in entries {
        let path = entry?.path();

        if !path.is_file() || path.extension().map_or(true, |ext| ext != "json")
        {
            continue;
        }

        if let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) {
            names.push(name.to_owned());
        }
    }

    if names.is_empty() {
        bail!("No keystore files found in {}", dir.display());
    }

    names.sort();

    Ok(names)
}

#[instrument(skip(prompter))]
pub fn load_account<P: Prompter>(
    prompter: &mut P,
    dir: &Path,
) -> eyre::Result<(String, LocalWallet)> {
    let name = prompter.select("Account", list_accounts(dir)?)?;
    let password = prompter.password(&format!("Password for '{name}':"))?;

    let wallet =
        LocalWallet::decrypt_keystore(dir.join(format!("{name}.json")), password)
            .with_context(|| format!("Unlocking account '{name}'"))?;

    Ok((name, wallet))
}
