// src/lib.rs

//! rosvoid: ROS distribution to xbps-src template generator
//!
//! Reads a ROS distribution catalog (`distribution.yaml`), resolves each
//! released repository's sub-packages from their `package.xml` manifests,
//! checksums the release tarball and writes one xbps-src `template` per
//! repository.
//!
//! # Architecture
//!
//! - `repository`: catalog, manifest and tarball retrieval behind [`Fetcher`]
//! - `recipe`: text formatting rules and template rendering
//! - `generate`: per-repository enrichment and the parallel driver
//! - Stateless: every run regenerates from the catalog

pub mod config;
mod error;
pub mod generate;
pub mod hash;
pub mod recipe;
pub mod repository;

pub use config::GeneratorConfig;
pub use error::{Error, Result};
pub use generate::{
    EnrichedRepository, Enrichment, GenerationReport, Generator, RepositoryOutcome,
};
pub use recipe::RecipeRenderer;
pub use repository::{Catalog, Fetcher, ManifestMode, Repository, RepositoryClient, SubPackage};
