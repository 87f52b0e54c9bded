use semver::Version;
use serde::{Deserialize, Serialize};

pub const DEFAULT_REGISTRY: &str = "v2.registry.ychad.eth";
pub const DEFAULT_GOVERNANCE: &str = "ychad.eth";
pub const DEFAULT_REWARDS: &str = "0x93A62dA5a14C80f265DAbC077fCEE437B1a0Efde";

/// Latest release assumed when the registry is not queried.
pub const PLACEHOLDER_RELEASE: Version = Version::new(0, 0, 0);

/// The subset of the ethpm package config this tool reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageConfig {
    pub version: Version,
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;
    use crate::serde_utils;

    #[tokio::test]
    async fn reads_version_from_ethpm_config() -> eyre::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("ethpm-config.yaml");

        tokio::fs::write(
            &path,
            indoc! {r#"
                version: 0.4.2
                settings:
                  deployment_networks:
                    - mainnet
                dependencies:
                  - OpenZeppelin/openzeppelin-contracts@3.1.0
            "#},
        )
        .await?;

        let config: PackageConfig = serde_utils::read_deserialize(&path).await?;

        assert_eq!(config.version, Version::new(0, 4, 2));

        Ok(())
    }

    #[tokio::test]
    async fn missing_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();

        let result = serde_utils::read_deserialize::<PackageConfig>(
            dir.path().join("missing.yaml"),
        )
        .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn rejects_non_semver_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ethpm-config.yaml");
        tokio::fs::write(&path, "version: latest\n").await.unwrap();

        let result = serde_utils::read_deserialize::<PackageConfig>(&path).await;

        assert!(result.is_err());
    }
}
