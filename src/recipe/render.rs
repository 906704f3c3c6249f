// src/recipe/render.rs

//! Recipe rendering
//!
//! Executes the xbps-src template against an enriched repository and writes
//! `<output>/<prefix>-<name>/template`. The first sub-package provides the
//! file header; every further sub-package becomes a `<name>_package()` block.
//!
//! All formatting (name normalization, truncation, wrapping) happens while
//! building the template context, so the template only interpolates.

use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use crate::generate::EnrichedRepository;
use crate::hash;
use crate::recipe::format::{
    normalize_version, prefixed_name, truncate_description, wrap_dependency_list,
};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use upon::{Engine, Template};

/// Name of the generated file inside each package directory
pub const RECIPE_FILE_NAME: &str = "template";

/// Built-in xbps-src template
pub const DEFAULT_TEMPLATE: &str = include_str!("void.tmpl");

// Columns consumed by the variable assignment preceding each list
const HOSTMAKEDEPENDS_COLUMN: usize = "hostmakedepends=\"".len();
const MAKEDEPENDS_COLUMN: usize = "makedepends=\"".len();
const DEPENDS_COLUMN: usize = "depends=\"".len();
// a leading tab counts as two columns
const SUB_DEPENDS_COLUMN: usize = 2 + DEPENDS_COLUMN;

/// Compiled recipe template plus the run-wide values it needs
pub struct RecipeRenderer {
    engine: Engine<'static>,
    template: Template<'static>,
    prefix: String,
    install_prefix: String,
    maintainer: String,
    python_version: String,
}

impl RecipeRenderer {
    /// Compile the built-in template
    pub fn new(config: &GeneratorConfig) -> Result<Self> {
        Self::with_template(config, DEFAULT_TEMPLATE.to_string())
    }

    /// Compile the template file configured in `config`, or the built-in one
    pub fn from_config(config: &GeneratorConfig) -> Result<Self> {
        match &config.template {
            Some(path) => {
                let source = fs::read_to_string(path).map_err(|e| {
                    Error::Config(format!("Failed to read template {}: {e}", path.display()))
                })?;
                Self::with_template(config, source)
            }
            None => Self::new(config),
        }
    }

    /// Compile a custom template source
    ///
    /// Syntax errors surface here rather than once per repository.
    pub fn with_template(config: &GeneratorConfig, source: String) -> Result<Self> {
        let engine = Engine::new();
        let template = engine
            .compile(source)
            .map_err(|e| Error::Config(format!("Invalid recipe template: {e}")))?;

        Ok(Self {
            engine,
            template,
            prefix: config.ecosystem_prefix(),
            install_prefix: config.install_prefix(),
            maintainer: config.maintainer.clone(),
            python_version: config.python_version.clone(),
        })
    }

    /// Package directory name for a repository
    pub fn package_dir_name(&self, repository_name: &str) -> String {
        prefixed_name(&self.prefix, repository_name)
    }

    /// Render the recipe text for `enriched`
    pub fn render_to_string(&self, enriched: &EnrichedRepository) -> Result<String> {
        let context = self.context(enriched)?;
        self.template
            .render(&self.engine, &context)
            .to_string()
            .map_err(|e| Error::Render {
                repository: enriched.name().to_string(),
                message: e.to_string(),
            })
    }

    /// Render and write the recipe below `output_root`, returning its path
    pub fn render(&self, enriched: &EnrichedRepository, output_root: &Path) -> Result<PathBuf> {
        let text = self.render_to_string(enriched)?;

        let dir = output_root.join(self.package_dir_name(enriched.name()));
        fs::create_dir_all(&dir).map_err(|e| {
            Error::Io(format!("Failed to create {}: {e}", dir.display()))
        })?;

        let path = dir.join(RECIPE_FILE_NAME);
        fs::write(&path, text).map_err(|e| {
            Error::Io(format!("Failed to write {}: {e}", path.display()))
        })?;

        debug!("Wrote {}", path.display());
        Ok(path)
    }

    fn context<'a>(&'a self, enriched: &'a EnrichedRepository) -> Result<RecipeContext<'a>> {
        let render_error = |message: &str| Error::Render {
            repository: enriched.name().to_string(),
            message: message.to_string(),
        };

        let (primary, rest) = enriched
            .sub_packages
            .split_first()
            .ok_or_else(|| render_error("no sub-packages to render"))?;

        if !hash::is_sha256_hex(&enriched.checksum) {
            return Err(render_error("checksum is not a SHA-256 hex digest"));
        }

        let subpackages = rest
            .iter()
            .map(|sub| SubRecipeContext {
                name: &sub.name,
                pkgname: prefixed_name(&self.prefix, &sub.name),
                short_desc: truncate_description(&sub.description),
                depends: wrap_dependency_list(
                    &self.prefix,
                    &sub.run_dependencies,
                    SUB_DEPENDS_COLUMN,
                    1,
                    true,
                ),
            })
            .collect();

        Ok(RecipeContext {
            name: enriched.name(),
            pkgname: self.package_dir_name(enriched.name()),
            version: normalize_version(enriched.version()),
            install_prefix: &self.install_prefix,
            python_version: &self.python_version,
            maintainer: &self.maintainer,
            hostmakedepends: wrap_dependency_list(
                &self.prefix,
                &primary.build_dependencies,
                HOSTMAKEDEPENDS_COLUMN,
                0,
                true,
            ),
            makedepends: wrap_dependency_list(
                &self.prefix,
                &primary.run_dependencies,
                MAKEDEPENDS_COLUMN,
                0,
                true,
            ),
            depends: wrap_dependency_list(
                &self.prefix,
                &primary.run_dependencies,
                DEPENDS_COLUMN,
                0,
                true,
            ),
            short_desc: truncate_description(&primary.description),
            distfiles: &enriched.tarball_url,
            checksum: &enriched.checksum,
            subpackages,
        })
    }
}

/// Values exposed to the recipe template
#[derive(Debug, Serialize)]
struct RecipeContext<'a> {
    name: &'a str,
    pkgname: String,
    version: String,
    install_prefix: &'a str,
    python_version: &'a str,
    maintainer: &'a str,
    hostmakedepends: String,
    makedepends: String,
    depends: String,
    short_desc: String,
    distfiles: &'a str,
    checksum: &'a str,
    subpackages: Vec<SubRecipeContext<'a>>,
}

/// Values for one appended `<name>_package()` block
#[derive(Debug, Serialize)]
struct SubRecipeContext<'a> {
    name: &'a str,
    pkgname: String,
    short_desc: String,
    depends: String,
}
