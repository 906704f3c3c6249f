// src/main.rs

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use rosvoid::generate::Generator;
use rosvoid::repository::RepositoryClient;
use tracing::info;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    let config = cli.to_config();
    config.validate()?;

    let client = RepositoryClient::new(config.timeout)?;
    let generator = Generator::new(config, Box::new(client))?;

    let catalog = generator.load_catalog().with_context(|| {
        format!(
            "Failed to load distribution catalog from {}",
            generator.config().catalog_url
        )
    })?;

    let report = generator.run(&catalog, cli.package.as_deref())?;

    for (name, error) in report.failures() {
        println!("  [FAILED] {}: {}", name, error);
    }
    if let Some(name) = cli.package.as_deref() {
        if report.outcomes.is_empty() {
            println!("Repository '{}' not found in catalog", name);
        }
    }

    println!(
        "Generated {} template(s) in {}: {} skipped (no release), {} failed",
        report.rendered(),
        generator.config().output_root.display(),
        report.skipped(),
        report.failed()
    );
    info!("Done");

    Ok(())
}
