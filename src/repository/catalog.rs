// src/repository/catalog.rs

//! ROS distribution catalog (distribution.yaml)
//!
//! The catalog maps repository names to their doc/release/source metadata.
//! Only `release` and `source` drive generation; the remaining fields are
//! decoded but otherwise ignored.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use tracing::info;

use super::client::Fetcher;

/// Decoded distribution catalog
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog {
    /// Repository name -> record, sorted by name
    #[serde(default)]
    pub repositories: BTreeMap<String, Repository>,

    /// Target platforms per OS (ignored)
    #[serde(default)]
    pub release_platforms: BTreeMap<String, Vec<serde_yaml::Value>>,

    /// Document type, normally "distribution" (ignored)
    #[serde(rename = "type", default)]
    pub kind: Option<String>,

    /// Catalog format version (ignored)
    #[serde(default)]
    pub version: Option<serde_yaml::Value>,
}

impl Catalog {
    /// Decode a catalog from YAML bytes
    pub fn from_yaml(bytes: &[u8]) -> Result<Self> {
        let mut catalog: Catalog = serde_yaml::from_slice(bytes)
            .map_err(|e| Error::Decode(format!("Invalid distribution catalog: {e}")))?;

        for (name, repository) in catalog.repositories.iter_mut() {
            repository.name = name.clone();
        }

        Ok(catalog)
    }

    /// Look up a repository by catalog key
    pub fn get(&self, name: &str) -> Option<&Repository> {
        self.repositories.get(name)
    }

    pub fn len(&self) -> usize {
        self.repositories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }
}

/// One catalog entry
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Repository {
    /// Catalog key, filled in after decoding
    #[serde(skip)]
    pub name: String,

    #[serde(default)]
    pub doc: Option<SourceInfo>,

    /// Present only when the repository has a tagged release
    #[serde(default)]
    pub release: Option<ReleaseInfo>,

    /// Development branch; empty when the catalog has no source entry
    #[serde(default)]
    pub source: SourceInfo,

    #[serde(default)]
    pub status: Option<String>,
}

impl Repository {
    /// Release info if the repository has a usable release channel
    pub fn release_channel(&self) -> Option<&ReleaseInfo> {
        self.release.as_ref().filter(|release| !release.url.is_empty())
    }
}

/// Release channel of a repository
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReleaseInfo {
    /// Explicit sub-package list; empty means the repository is one package
    #[serde(default)]
    pub packages: Vec<String>,

    /// Tag templates, e.g. `release: release/melodic/{package}/{version}`
    #[serde(default)]
    pub tags: BTreeMap<String, String>,

    #[serde(default, deserialize_with = "scalar_string")]
    pub url: String,

    #[serde(default, deserialize_with = "scalar_string")]
    pub version: String,
}

/// Source or doc entry of a repository
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceInfo {
    #[serde(rename = "type", default, deserialize_with = "scalar_string")]
    pub kind: String,

    #[serde(default, deserialize_with = "scalar_string")]
    pub url: String,

    #[serde(default, deserialize_with = "scalar_string")]
    pub version: String,
}

/// Accept any YAML scalar as a string
///
/// Branch names like `1.9` are written unquoted in
/// distribution.yaml and would otherwise decode as numbers.
fn scalar_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error as _;

    match serde_yaml::Value::deserialize(deserializer)? {
        serde_yaml::Value::Null => Ok(String::new()),
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        other => Err(D::Error::custom(format!("expected a scalar, found {other:?}"))),
    }
}

/// Retrieve and decode the catalog at `catalog_url`
pub fn fetch_catalog(fetcher: &dyn Fetcher, catalog_url: &str) -> Result<Catalog> {
    info!("Fetching distribution catalog from {}", catalog_url);
    let body = fetcher.fetch(catalog_url)?;
    let catalog = Catalog::from_yaml(&body)?;
    info!("Catalog lists {} repositories", catalog.len());
    Ok(catalog)
}
