use semver::Version;

use crate::types::DeploymentMode;

/// Outcome of comparing the local package version with the registry's latest release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseGate {
    Outdated,
    NewRelease,
    Experimental,
}

impl ReleaseGate {
    pub fn deployment_mode(self) -> Option<DeploymentMode> {
        match self {
            ReleaseGate::Outdated => None,
            ReleaseGate::NewRelease => Some(DeploymentMode::Release),
            ReleaseGate::Experimental => Some(DeploymentMode::Experimental),
        }
    }
}

pub fn gate(package: &Version, latest: &Version) -> ReleaseGate {
    match package.cmp(latest) {
        std::cmp::Ordering::Less => ReleaseGate::Outdated,
        std::cmp::Ordering::Greater => ReleaseGate::NewRelease,
        std::cmp::Ordering::Equal => ReleaseGate::Experimental,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        s.parse().unwrap()
    }

    #[test]
    fn newer_package_is_a_new_release() {
        let gate = gate(&v("0.1.0"), &v("0.0.0"));

        assert_eq!(gate, ReleaseGate::NewRelease);
        assert_eq!(gate.deployment_mode(), Some(DeploymentMode::Release));
    }

    #[test]
    fn older_package_aborts() {
        let gate = gate(&v("0.0.0"), &v("0.1.0"));

        assert_eq!(gate, ReleaseGate::Outdated);
        assert_eq!(gate.deployment_mode(), None);
    }

    #[test]
    fn same_version_is_experimental_and_uses_proxy() {
        let gate = gate(&v("0.3.5"), &v("0.3.5"));

        assert_eq!(gate, ReleaseGate::Experimental);
        assert!(gate.deployment_mode().unwrap().uses_proxy());
    }

    #[test]
    fn compares_by_semver_precedence() {
        assert_eq!(gate(&v("0.10.0"), &v("0.9.9")), ReleaseGate::NewRelease);
        assert_eq!(gate(&v("1.0.0-beta.1"), &v("1.0.0")), ReleaseGate::Outdated);
    }
}
