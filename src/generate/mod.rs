// src/generate/mod.rs

//! Catalog-wide recipe generation
//!
//! [`Generator`] fans enrichment and rendering out over the catalog, one
//! rayon task per repository. Tasks share only read-only state (config,
//! fetcher, compiled template) and each writes its own output directory.
//! A failing repository is recorded in the [`GenerationReport`] and never
//! affects its siblings.

mod enrich;

pub use enrich::{enrich, sub_package_names, EnrichedRepository, Enrichment};

use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use crate::recipe::RecipeRenderer;
use crate::repository::{fetch_catalog, Catalog, Fetcher, Repository};
use rayon::prelude::*;
use std::path::PathBuf;
use tracing::{error, info, info_span, warn};

/// Upper bound on workers when no job count is configured
pub const MAX_DEFAULT_WORKERS: usize = 64;

/// Worker threads for a run over `repositories` entries
///
/// An explicit `jobs` wins. Otherwise tasks spend their time waiting on the
/// network, so every repository gets its own worker up to
/// [`MAX_DEFAULT_WORKERS`], and never fewer than one per CPU.
pub fn worker_count(jobs: usize, repositories: usize) -> usize {
    if jobs > 0 {
        return jobs;
    }
    let cpus = std::thread::available_parallelism().map_or(1, |n| n.get());
    repositories.min(MAX_DEFAULT_WORKERS).max(cpus).max(1)
}

/// Terminal state of one repository
#[derive(Debug)]
pub enum RepositoryOutcome {
    /// Recipe written to the contained path
    Rendered(PathBuf),
    /// No release channel; skipped without error
    NoRelease,
    /// Enrichment or rendering failed
    Failed(Error),
}

/// Per-repository outcomes of a run, sorted by repository name
#[derive(Debug, Default)]
pub struct GenerationReport {
    pub outcomes: Vec<(String, RepositoryOutcome)>,
}

impl GenerationReport {
    pub fn rendered(&self) -> usize {
        self.count(|outcome| matches!(outcome, RepositoryOutcome::Rendered(_)))
    }

    pub fn skipped(&self) -> usize {
        self.count(|outcome| matches!(outcome, RepositoryOutcome::NoRelease))
    }

    pub fn failed(&self) -> usize {
        self.count(|outcome| matches!(outcome, RepositoryOutcome::Failed(_)))
    }

    /// Failed repositories with their errors
    pub fn failures(&self) -> impl Iterator<Item = (&str, &Error)> {
        self.outcomes.iter().filter_map(|(name, outcome)| match outcome {
            RepositoryOutcome::Failed(e) => Some((name.as_str(), e)),
            _ => None,
        })
    }

    pub fn get(&self, name: &str) -> Option<&RepositoryOutcome> {
        self.outcomes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, outcome)| outcome)
    }

    fn count(&self, predicate: impl Fn(&RepositoryOutcome) -> bool) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| predicate(outcome))
            .count()
    }
}

/// Drives catalog retrieval, enrichment and rendering
pub struct Generator {
    config: GeneratorConfig,
    fetcher: Box<dyn Fetcher>,
    renderer: RecipeRenderer,
}

impl Generator {
    /// Create a generator, compiling the recipe template up front
    pub fn new(config: GeneratorConfig, fetcher: Box<dyn Fetcher>) -> Result<Self> {
        let renderer = RecipeRenderer::from_config(&config)?;
        Ok(Self {
            config,
            fetcher,
            renderer,
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Fetch and decode the configured catalog
    pub fn load_catalog(&self) -> Result<Catalog> {
        fetch_catalog(self.fetcher.as_ref(), &self.config.catalog_url)
    }

    /// Enrich and render a single repository
    pub fn process(&self, repository: &Repository) -> RepositoryOutcome {
        let span = info_span!("repository", name = %repository.name);
        let _enter = span.enter();

        let enriched = match enrich(self.fetcher.as_ref(), &self.config, repository) {
            Enrichment::NoRelease => return RepositoryOutcome::NoRelease,
            Enrichment::Enriched(enriched) => enriched,
            Enrichment::Failed { error, partial } => {
                error!(
                    "Skipping {} after {} sub-package(s): {}",
                    repository.name,
                    partial.len(),
                    error
                );
                return RepositoryOutcome::Failed(error);
            }
        };

        match self.renderer.render(&enriched, &self.config.output_root) {
            Ok(path) => {
                info!("Generated {}", path.display());
                RepositoryOutcome::Rendered(path)
            }
            Err(e) => {
                error!("Skipping {}: {}", repository.name, e);
                RepositoryOutcome::Failed(e)
            }
        }
    }

    /// Process the whole catalog, or only `selection` when given
    ///
    /// Returns once every repository task has finished. An unknown
    /// selection yields an empty report.
    pub fn run(&self, catalog: &Catalog, selection: Option<&str>) -> Result<GenerationReport> {
        let repositories: Vec<&Repository> = match selection {
            Some(name) => match catalog.get(name) {
                Some(repository) => vec![repository],
                None => {
                    warn!("Repository '{}' not found in catalog, nothing to do", name);
                    return Ok(GenerationReport::default());
                }
            },
            None => catalog.repositories.values().collect(),
        };

        let workers = worker_count(self.config.jobs, repositories.len());
        info!(
            "Generating recipes for {} repositories on {} workers",
            repositories.len(),
            workers
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create worker pool: {e}")))?;

        let mut outcomes: Vec<(String, RepositoryOutcome)> = pool.install(|| {
            repositories
                .par_iter()
                .map(|repository| (repository.name.clone(), self.process(repository)))
                .collect()
        });

        outcomes.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(GenerationReport { outcomes })
    }
}
