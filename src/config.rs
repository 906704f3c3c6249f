// src/config.rs

//! Run-wide generator configuration
//!
//! One run targets exactly one ROS distribution. Everything that would
//! otherwise be a hard-coded constant (catalog location, codename, output
//! root, maintainer line) lives here so the CLI and tests can override it.

use crate::error::{Error, Result};
use crate::repository::ManifestMode;
use std::path::PathBuf;
use std::time::Duration;

/// Default ROS distribution catalog
pub const DEFAULT_CATALOG_URL: &str =
    "https://raw.githubusercontent.com/ros/rosdistro/master/melodic/distribution.yaml";

/// Default host serving raw repository files (package.xml)
pub const DEFAULT_RAW_HOST: &str = "https://raw.githubusercontent.com";

/// Default distribution codename
pub const DEFAULT_DISTRO: &str = "melodic";

/// Default python version the generated templates build against
pub const DEFAULT_PYTHON_VERSION: &str = "3.6";

/// Default output root
pub const DEFAULT_OUTPUT_DIR: &str = "out";

/// Default maintainer line for generated templates
pub const DEFAULT_MAINTAINER: &str = "rosvoid <rosvoid@localhost>";

/// Configuration for a generation run
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// URL of the distribution.yaml catalog
    pub catalog_url: String,
    /// Distribution codename (e.g. "melodic")
    pub distro: String,
    /// Base URL for raw repository content
    pub raw_host: String,
    /// Directory receiving one subdirectory per generated package
    pub output_root: PathBuf,
    /// Value of the `maintainer=` line
    pub maintainer: String,
    /// Python version used in configure arguments
    pub python_version: String,
    /// How malformed package.xml files are treated
    pub manifest_mode: ManifestMode,
    /// Worker threads for per-repository tasks (0 = one per repository, capped at 64)
    pub jobs: usize,
    /// Optional per-request HTTP timeout (None = wait forever)
    pub timeout: Option<Duration>,
    /// Optional template file replacing the built-in recipe template
    pub template: Option<PathBuf>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            distro: DEFAULT_DISTRO.to_string(),
            raw_host: DEFAULT_RAW_HOST.to_string(),
            output_root: PathBuf::from(DEFAULT_OUTPUT_DIR),
            maintainer: DEFAULT_MAINTAINER.to_string(),
            python_version: DEFAULT_PYTHON_VERSION.to_string(),
            manifest_mode: ManifestMode::default(),
            jobs: 0,
            timeout: None,
            template: None,
        }
    }
}

impl GeneratorConfig {
    /// Namespace prepended to every generated package and dependency name
    pub fn ecosystem_prefix(&self) -> String {
        format!("ros-{}", self.distro)
    }

    /// Install prefix of the distribution inside the target system
    pub fn install_prefix(&self) -> String {
        format!("/opt/ros/{}", self.distro)
    }

    /// Reject configurations that cannot produce usable URLs or names
    pub fn validate(&self) -> Result<()> {
        if self.distro.trim().is_empty() {
            return Err(Error::Config("distribution codename is empty".to_string()));
        }
        if self.distro.contains(['/', ' ']) {
            return Err(Error::Config(format!(
                "distribution codename '{}' must not contain '/' or spaces",
                self.distro
            )));
        }
        for (label, url) in [("catalog URL", &self.catalog_url), ("raw host", &self.raw_host)] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(Error::Config(format!("{label} '{url}' is not an http(s) URL")));
            }
        }
        if self.python_version.trim().is_empty() {
            return Err(Error::Config("python version is empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_target_melodic() {
        let config = GeneratorConfig::default();
        assert_eq!(config.ecosystem_prefix(), "ros-melodic");
        assert_eq!(config.install_prefix(), "/opt/ros/melodic");
        assert_eq!(config.output_root, PathBuf::from("out"));
        assert_eq!(config.manifest_mode, ManifestMode::Lenient);
        assert!(config.timeout.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_prefix_follows_distro() {
        let config = GeneratorConfig {
            distro: "noetic".to_string(),
            ..Default::default()
        };
        assert_eq!(config.ecosystem_prefix(), "ros-noetic");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let empty_distro = GeneratorConfig {
            distro: " ".to_string(),
            ..Default::default()
        };
        assert!(matches!(empty_distro.validate(), Err(Error::Config(_))));

        let bad_url = GeneratorConfig {
            catalog_url: "ftp://example.com/distribution.yaml".to_string(),
            ..Default::default()
        };
        assert!(matches!(bad_url.validate(), Err(Error::Config(_))));

        let slashed = GeneratorConfig {
            distro: "melodic/extra".to_string(),
            ..Default::default()
        };
        assert!(slashed.validate().is_err());
    }
}
