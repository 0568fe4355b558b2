//! Command-line interface for beatport2flac.
//!
//! Takes Beatport WAV downloads as positional arguments and converts each
//! one into a tagged FLAC file next to it.

mod commands;

pub use commands::{Cli, run_command};
