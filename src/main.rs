//! beatport2flac - converts Beatport WAV downloads into tagged FLAC files.
//!
//! The track id embedded in each download's filename is looked up in the
//! Beatport catalog; the file is then encoded with `flac`, the cover art
//! embedded, and title, artist, album, year and genre written as tags.

pub mod artwork;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod encoder;
pub mod error;
pub mod metadata;
pub mod pipeline;
pub mod source;
#[cfg(test)]
pub mod test_utils;
pub mod traits;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("beatport2flac=info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();

    cli::run_command(&args)
}
