// src/repository/mod.rs

//! Remote metadata retrieval
//!
//! This module provides functionality for:
//! - Fetching and decoding the distribution catalog
//! - Locating and decoding per-package manifests
//! - Deriving release tarball URLs and computing their checksums
//! - The HTTP client behind all of the above

mod catalog;
mod client;
mod manifest;
mod source_url;
mod tarball;

// Re-export main types and functions
pub use catalog::{fetch_catalog, Catalog, ReleaseInfo, Repository, SourceInfo};
pub use client::{Fetcher, RepositoryClient};
pub use manifest::{
    fetch_sub_package_manifest, manifest_url, ManifestMode, SubPackage, MANIFEST_FILE_NAME,
};
pub use source_url::HostedRepo;
pub use tarball::{compute_checksum, derive_tarball_url};

#[cfg(test)]
pub(crate) use client::testing;
