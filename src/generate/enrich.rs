// src/generate/enrich.rs

//! Per-repository enrichment
//!
//! Turns a catalog entry into everything the renderer needs: the release
//! tarball URL, its checksum, and one decoded manifest per sub-package.
//! Steps run strictly in order within a repository:
//!
//! ```text
//! release channel? --no--> NoRelease
//!        |
//!   tarball URL -> checksum -> manifests (in list order) -> Enriched
//!                     |              |
//!                     +---> Failed <-+
//! ```

use crate::config::GeneratorConfig;
use crate::error::Error;
use crate::repository::{
    compute_checksum, derive_tarball_url, fetch_sub_package_manifest, Fetcher, Repository,
    SubPackage,
};
use tracing::{debug, info};

/// A repository with everything needed to render its recipe
#[derive(Debug, Clone)]
pub struct EnrichedRepository {
    pub repository: Repository,
    pub tarball_url: String,
    /// Lowercase hex SHA-256 of the tarball
    pub checksum: String,
    /// Index 0 is the primary sub-package
    pub sub_packages: Vec<SubPackage>,
}

impl EnrichedRepository {
    pub fn name(&self) -> &str {
        &self.repository.name
    }

    /// Release version, empty if the repository has none
    pub fn version(&self) -> &str {
        self.repository
            .release
            .as_ref()
            .map(|release| release.version.as_str())
            .unwrap_or_default()
    }
}

/// Terminal state of one repository's enrichment
#[derive(Debug)]
pub enum Enrichment {
    /// No release channel; nothing to generate
    NoRelease,
    /// Ready to render
    Enriched(EnrichedRepository),
    /// Stopped at `error`; `partial` holds the sub-packages decoded before it
    Failed {
        error: Error,
        partial: Vec<SubPackage>,
    },
}

impl Enrichment {
    fn failed(error: Error) -> Self {
        Self::Failed {
            error,
            partial: Vec::new(),
        }
    }
}

/// Sub-packages released from a repository: the explicit list, or the
/// repository itself
pub fn sub_package_names(repository: &Repository) -> Vec<String> {
    match &repository.release {
        Some(release) if !release.packages.is_empty() => release.packages.clone(),
        _ => vec![repository.name.clone()],
    }
}

/// Enrich one catalog entry
///
/// Network calls happen sequentially: the tarball checksum first, then each
/// manifest. The first failing manifest stops the loop.
pub fn enrich(fetcher: &dyn Fetcher, config: &GeneratorConfig, repository: &Repository) -> Enrichment {
    let Some(release) = repository.release_channel() else {
        debug!("{} has no release channel, skipping", repository.name);
        return Enrichment::NoRelease;
    };

    let tarball_url = derive_tarball_url(
        &repository.name,
        &release.version,
        &release.url,
        &config.distro,
    );

    let checksum = match compute_checksum(fetcher, &tarball_url) {
        Ok(checksum) => checksum,
        Err(e) => return Enrichment::failed(e),
    };

    let names = sub_package_names(repository);
    let mut sub_packages = Vec::with_capacity(names.len());

    for name in &names {
        let result = fetch_sub_package_manifest(
            fetcher,
            &config.raw_host,
            name,
            &repository.source.version,
            &repository.source.url,
            config.manifest_mode,
        );

        match result {
            Ok(sub_package) => sub_packages.push(sub_package),
            Err(error) => {
                return Enrichment::Failed {
                    error,
                    partial: sub_packages,
                };
            }
        }
    }

    info!(
        "Resolved {} sub-package(s) for {}",
        sub_packages.len(),
        repository.name
    );

    Enrichment::Enriched(EnrichedRepository {
        repository: repository.clone(),
        tarball_url,
        checksum,
        sub_packages,
    })
}
