//! CLI argument definitions and dispatch.
//!
//! Settings are layered: config file, then environment, then flags.
//! The conversion itself lives in `convert`.

mod convert;

use clap::{CommandFactory, Parser};
use std::path::PathBuf;

use crate::artwork::ArtworkPolicy;
use crate::config::{self, Config};

pub use convert::cmd_convert;

/// Convert Beatport WAV downloads into tagged FLAC files
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Beatport downloads named `<track id>_<anything>.wav`
    pub files: Vec<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Catalog track lookup endpoint
    #[arg(long, env = "BEATPORT_CATALOG_URL")]
    pub catalog_url: Option<String>,

    /// FLAC encoder executable
    #[arg(long, env = "FLAC_BIN")]
    pub encoder: Option<String>,

    /// Kill the encoder after this many seconds
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub encoder_timeout: Option<u64>,

    /// What a failed artwork download does to the file
    #[arg(long, value_enum)]
    pub artwork_policy: Option<ArtworkPolicy>,

    /// Do not download or embed cover art
    #[arg(long)]
    pub no_artwork: bool,
}

impl Cli {
    /// Load the config file and apply flag/env overrides on top.
    pub fn resolve_config(&self) -> anyhow::Result<Config> {
        let config = match &self.config {
            Some(path) => config::load_from(path)?,
            None => config::load(),
        };
        Ok(self.apply_overrides(config))
    }

    fn apply_overrides(&self, mut config: Config) -> Config {
        if let Some(url) = &self.catalog_url {
            config.catalog.base_url = url.clone();
        }
        if let Some(program) = &self.encoder {
            config.encoder.program = program.clone();
        }
        if let Some(secs) = self.encoder_timeout {
            config.encoder.timeout_secs = Some(secs);
        }
        if let Some(policy) = self.artwork_policy {
            config.artwork.policy = policy;
        }
        if self.no_artwork {
            config.artwork.enabled = false;
        }
        config
    }
}

/// Run the CLI.
///
/// With no input files this prints usage and succeeds. Per-file failures
/// never produce an error here; only startup problems do.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    if cli.files.is_empty() {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    }

    let config = cli.resolve_config()?;
    cmd_convert(&config, &cli.files)
}
