//! FLAC encoding using the reference `flac` command-line tool
//!
//! This module shells out to `flac` rather than encoding in-process. The
//! encoder writes `<name>.flac` next to `<name>.wav`, verifies the result
//! (`-V`), and embeds the cover art when one is given.
//!
//! Install flac:
//! - Windows: `winget install Xiph.FLAC` or download from https://xiph.org/flac/download.html
//! - macOS: `brew install flac`
//! - Linux: `apt install flac` or equivalent

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;

use crate::error::{ConvertError, Result};

/// Encoder executable used when nothing else is configured
pub const DEFAULT_PROGRAM: &str = "flac";

/// Cover art is always embedded as a JPEG front cover
const PICTURE_SPEC_PREFIX: &str = "--picture=|image/jpeg|||";

/// How the encoder process ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderExit {
    /// Exit code, `None` when terminated by a signal
    pub code: Option<i32>,
}

impl EncoderExit {
    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<std::process::ExitStatus> for EncoderExit {
    fn from(status: std::process::ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

impl fmt::Display for EncoderExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {code}"),
            None => f.write_str("terminated by signal"),
        }
    }
}

/// Build the encoder argument list. The source file is always last.
pub fn encoder_args(source: &Path, artwork: Option<&Path>) -> Vec<OsString> {
    let mut args = vec![OsString::from("-V")];
    if let Some(artwork) = artwork {
        let mut picture = OsString::from(PICTURE_SPEC_PREFIX);
        picture.push(artwork.as_os_str());
        args.push(picture);
    }
    args.push(source.as_os_str().to_owned());
    args
}

/// Runs the external `flac` encoder
pub struct FlacEncoder {
    program: PathBuf,
    timeout: Option<Duration>,
}

impl FlacEncoder {
    pub fn new(program: impl Into<PathBuf>, timeout: Option<Duration>) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    /// Encode `source`, embedding `artwork` as the front cover when given.
    ///
    /// Spawn failures and timeouts are errors; the exit status is returned
    /// as-is for the caller to judge.
    pub async fn convert(&self, source: &Path, artwork: Option<&Path>) -> Result<EncoderExit> {
        let args = encoder_args(source, artwork);
        tracing::debug!(program = %self.program.display(), ?args, "Running encoder");

        let mut command = Command::new(&self.program);
        command.args(&args);
        command.kill_on_drop(true);

        let status = match self.timeout {
            Some(limit) => timeout(limit, command.status()).await.map_err(|_| {
                ConvertError::encoding(
                    source,
                    format!("timed out after {}s", limit.as_secs()),
                )
            })?,
            None => command.status().await,
        }
        .map_err(|e| {
            ConvertError::encoding(
                source,
                format!("failed to run {}: {e}", self.program.display()),
            )
        })?;

        Ok(status.into())
    }

    /// Get the encoder version string (for the startup check)
    pub fn version(&self) -> Option<String> {
        std::process::Command::new(&self.program)
            .arg("--version")
            .output()
            .ok()
            .filter(|o| o.status.success())
            .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
    }
}
