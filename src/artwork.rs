//! Cover art download.
//!
//! The catalog publishes a URL for the large cover image. The bytes are
//! written verbatim into a temporary file that the encoder embeds as the
//! front cover. The temporary file is removed when the [`ArtworkAsset`]
//! is dropped, so every exit path of a file's processing cleans it up.

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use crate::error::{ConvertError, Result};

const TEMP_PREFIX: &str = "beatport-artwork-";

/// What a failed artwork download does to the file being converted
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum ArtworkPolicy {
    /// Log the failure and convert without artwork
    #[default]
    FailSoft,
    /// Fail the file
    Strict,
}

/// Downloaded cover art staged on disk for the encoder
#[derive(Debug)]
pub struct ArtworkAsset {
    file: NamedTempFile,
}

impl ArtworkAsset {
    /// Write image bytes into a new temporary file.
    ///
    /// Uses `dir` when given, the system temp directory otherwise.
    pub fn from_bytes(bytes: &[u8], dir: Option<&Path>) -> std::io::Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(TEMP_PREFIX).suffix(".jpg");
        let mut file = match dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        file.write_all(bytes)?;
        file.flush()?;
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Delete the file now, reporting failures instead of ignoring them.
    pub fn close(self) -> std::io::Result<()> {
        self.file.close()
    }
}

/// Artwork HTTP client
pub struct ArtworkClient {
    http_client: reqwest::Client,
}

impl ArtworkClient {
    pub fn new(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }

    /// Download an image. No content-type validation is done.
    pub async fn download(&self, url: &str) -> Result<Vec<u8>> {
        tracing::debug!(url, "Downloading artwork");

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| ConvertError::transport(format!("artwork: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConvertError::transport(format!("artwork: HTTP {status}")));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ConvertError::transport(format!("artwork: {e}")))?;

        Ok(bytes.to_vec())
    }
}
