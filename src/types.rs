use std::fmt;

use ethers::types::Address;
use ethers::utils::to_checksum;
use semver::Version;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum DeploymentMode {
    /// Fresh `Vault` deployed by the signer, then initialized.
    #[display(fmt = "release")]
    Release,
    /// Proxy clone created through the registry's `newExperimentalVault`.
    #[display(fmt = "experimental")]
    Experimental,
}

impl DeploymentMode {
    pub fn uses_proxy(self) -> bool {
        matches!(self, Self::Experimental)
    }
}

pub fn default_vault_name(token_symbol: &str) -> String {
    format!("{token_symbol} yVault")
}

pub fn default_vault_symbol(token_symbol: &str) -> String {
    format!("yv{token_symbol}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultParameters {
    pub version: Version,
    pub token: Address,
    pub token_symbol: String,
    pub governance: Address,
    pub rewards: Address,
    pub guardian: Address,
    pub name: String,
    pub symbol: String,
}

impl VaultParameters {
    /// Empty string tells the vault to derive its own name.
    pub fn name_override(&self) -> String {
        override_or_empty(&self.name, &default_vault_name(&self.token_symbol))
    }

    pub fn symbol_override(&self) -> String {
        override_or_empty(
            &self.symbol,
            &default_vault_symbol(&self.token_symbol),
        )
    }
}

fn override_or_empty(value: &str, default: &str) -> String {
    if value == default {
        String::new()
    } else {
        value.to_owned()
    }
}

impl fmt::Display for VaultParameters {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "    Vault Parameters")?;
        writeln!(f)?;
        writeln!(f, "   version: {}", self.version)?;
        writeln!(f, "     token: {}", to_checksum(&self.token, None))?;
        writeln!(f, "  governer: {}", to_checksum(&self.governance, None))?;
        writeln!(f, "   rewards: {}", to_checksum(&self.rewards, None))?;
        writeln!(f, "  guardian: {}", to_checksum(&self.guardian, None))?;
        writeln!(f, "      name: '{}'", self.name)?;
        writeln!(f, "    symbol: '{}'", self.symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parameters(name: &str, symbol: &str) -> VaultParameters {
        VaultParameters {
            version: Version::new(0, 4, 2),
            token: Address::repeat_byte(0x11),
            token_symbol: "DAI".to_owned(),
            governance: Address::repeat_byte(0x22),
            rewards: Address::repeat_byte(0x33),
            guardian: Address::repeat_byte(0x44),
            name: name.to_owned(),
            symbol: symbol.to_owned(),
        }
    }

    #[test]
    fn defaults_derive_from_token_symbol() {
        assert_eq!(default_vault_name("DAI"), "DAI yVault");
        assert_eq!(default_vault_symbol("DAI"), "yvDAI");
    }

    #[test]
    fn accepted_defaults_become_empty_overrides() {
        let params = parameters("DAI yVault", "yvDAI");

        assert_eq!(params.name_override(), "");
        assert_eq!(params.symbol_override(), "");
    }

    #[test]
    fn custom_values_pass_through_verbatim() {
        let params = parameters("Dai Savings Vault ", "yvDAI-2");

        assert_eq!(params.name_override(), "Dai Savings Vault ");
        assert_eq!(params.symbol_override(), "yvDAI-2");
    }

    #[test]
    fn summary_lists_every_parameter() {
        let params = parameters("DAI yVault", "yvDAI");
        let summary = params.to_string();

        assert!(summary.contains("Vault Parameters"));
        assert!(summary.contains("   version: 0.4.2"));
        assert!(summary.contains(&format!(
            "     token: {}",
            to_checksum(&params.token, None)
        )));
        assert!(summary.contains(&format!(
            "  guardian: {}",
            to_checksum(&params.guardian, None)
        )));
        assert!(summary.contains("      name: 'DAI yVault'"));
        assert!(summary.contains("    symbol: 'yvDAI'"));
    }

    #[test]
    fn only_experimental_uses_proxy() {
        assert!(DeploymentMode::Experimental.uses_proxy());
        assert!(!DeploymentMode::Release.uses_proxy());
    }
}
