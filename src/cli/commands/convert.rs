//! The conversion command.

use std::path::PathBuf;
use tokio::runtime::Runtime;

use crate::artwork::ArtworkClient;
use crate::catalog::{CatalogClient, build_http_client};
use crate::config::Config;
use crate::encoder::FlacEncoder;
use crate::pipeline::{FileOutcome, Pipeline, RunReport};

/// Convert every file, then print failures and a summary.
pub fn cmd_convert(config: &Config, files: &[PathBuf]) -> anyhow::Result<()> {
    let encoder = FlacEncoder::new(&config.encoder.program, config.encoder.timeout());
    match encoder.version() {
        Some(version) => tracing::debug!(%version, "Found encoder"),
        None => {
            eprintln!("✗ {}: NOT FOUND", config.encoder.program);
            print_flac_install_instructions();
            anyhow::bail!("FLAC encoder '{}' is not available", config.encoder.program);
        }
    }

    let http_client = build_http_client(config.catalog.timeout())?;
    let pipeline = Pipeline::new(
        CatalogClient::new(http_client.clone(), config.catalog.base_url.clone()),
        ArtworkClient::new(http_client),
        encoder,
        config.artwork.clone(),
    );

    let rt = Runtime::new()?;
    let report = rt.block_on(pipeline.run(files));

    print_report(&report);
    Ok(())
}

fn print_report(report: &RunReport) {
    println!();
    for outcome in &report.outcomes {
        println!("{}", outcome_line(outcome));
    }
    println!(
        "\n{} converted, {} skipped, {} failed",
        report.converted(),
        report.skipped(),
        report.failed()
    );
}

fn outcome_line(outcome: &FileOutcome) -> String {
    match &outcome.result {
        Ok(tags) => match (&tags.artist, &tags.title) {
            (Some(artist), Some(title)) => {
                format!("✓ {}: {} - {}", outcome.output().display(), artist, title)
            }
            _ => format!("✓ {}", outcome.output().display()),
        },
        Err(e) if e.is_recoverable() => format!("- {}: {}", outcome.source.display(), e),
        Err(e) => format!("✗ {}: {}", outcome.source.display(), e),
    }
}

fn print_flac_install_instructions() {
    eprintln!("  Install flac:");
    eprintln!("    Windows: winget install Xiph.FLAC");
    eprintln!("    macOS:   brew install flac");
    eprintln!("    Linux:   apt install flac (or your package manager)");
    eprintln!("  Or point --encoder / FLAC_BIN at an existing flac binary");
}
