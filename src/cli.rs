// src/cli.rs
//! CLI definitions for rosvoid
//!
//! Every flag can also be set through a `ROSVOID_*` environment variable.

use clap::Parser;
use rosvoid::config::{
    GeneratorConfig, DEFAULT_CATALOG_URL, DEFAULT_DISTRO, DEFAULT_MAINTAINER, DEFAULT_OUTPUT_DIR,
    DEFAULT_PYTHON_VERSION, DEFAULT_RAW_HOST,
};
use rosvoid::repository::ManifestMode;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "rosvoid")]
#[command(author = "rosvoid contributors")]
#[command(version)]
#[command(about = "Generate xbps-src templates from a ROS distribution catalog", long_about = None)]
pub struct Cli {
    /// Only generate the named catalog repository
    #[arg(short, long, env = "ROSVOID_PACKAGE")]
    pub package: Option<String>,

    /// URL of the distribution.yaml catalog
    #[arg(long, env = "ROSVOID_CATALOG_URL", default_value = DEFAULT_CATALOG_URL)]
    pub catalog_url: String,

    /// ROS distribution codename
    #[arg(long, env = "ROSVOID_DISTRO", default_value = DEFAULT_DISTRO)]
    pub distro: String,

    /// Host serving raw package.xml files
    #[arg(long, env = "ROSVOID_RAW_HOST", default_value = DEFAULT_RAW_HOST)]
    pub raw_host: String,

    /// Output directory (one subdirectory per package)
    #[arg(short, long, env = "ROSVOID_OUTPUT", default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,

    /// Maintainer line written into every template
    #[arg(long, env = "ROSVOID_MAINTAINER", default_value = DEFAULT_MAINTAINER)]
    pub maintainer: String,

    /// Python version the packages build against
    #[arg(long, env = "ROSVOID_PYTHON_VERSION", default_value = DEFAULT_PYTHON_VERSION)]
    pub python_version: String,

    /// Fail a repository on malformed package.xml instead of keeping partial data
    #[arg(long, env = "ROSVOID_STRICT_MANIFESTS")]
    pub strict_manifests: bool,

    /// Worker threads (0 = one per repository, up to 64)
    #[arg(short, long, env = "ROSVOID_JOBS", default_value_t = 0)]
    pub jobs: usize,

    /// Per-request HTTP timeout in seconds (no timeout if omitted)
    #[arg(long, env = "ROSVOID_TIMEOUT", value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Template file replacing the built-in recipe template
    #[arg(long, env = "ROSVOID_TEMPLATE", value_name = "FILE")]
    pub template: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn to_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            catalog_url: self.catalog_url.clone(),
            distro: self.distro.clone(),
            raw_host: self.raw_host.clone(),
            output_root: self.output.clone(),
            maintainer: self.maintainer.clone(),
            python_version: self.python_version.clone(),
            manifest_mode: if self.strict_manifests {
                ManifestMode::Strict
            } else {
                ManifestMode::Lenient
            },
            jobs: self.jobs,
            timeout: self.timeout.map(Duration::from_secs),
            template: self.template.clone(),
        }
    }
}
