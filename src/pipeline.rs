//! Conversion pipeline - turns Beatport WAV downloads into tagged FLAC files
//!
//! Per file, strictly in order:
//! 1. Extract the track id from the filename
//! 2. Resolve metadata from the catalog
//! 3. Download the large cover image, if any, into a temporary file
//! 4. Run the encoder (embedding the cover), then delete the temporary file
//! 5. Check the `.flac` output exists, restrict its permissions, write tags
//!
//! Files are processed one at a time and share nothing. A failure of any
//! kind, including a panic, ends that file only; the run continues with the
//! next input.

use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::path::{Path, PathBuf};

use crate::artwork::{ArtworkAsset, ArtworkPolicy};
use crate::catalog::TrackMetadata;
use crate::config::ArtworkConfig;
use crate::error::{ConvertError, Result};
use crate::metadata::{self, FileTags};
use crate::source;
use crate::traits::{ArtworkApi, CatalogApi, EncoderApi};

/// Furthest point a file's processing reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Start,
    IdExtracted,
    MetadataResolved,
    ArtworkReady,
    Converted,
    Tagged,
    Done,
}

/// Result of processing one input file
#[derive(Debug)]
pub struct FileOutcome {
    pub source: PathBuf,
    /// Last stage entered; for failures, the stage the error occurred after
    pub stage: Stage,
    /// Tags read back from the output on success
    pub result: Result<FileTags>,
}

impl FileOutcome {
    pub fn is_done(&self) -> bool {
        self.result.is_ok()
    }

    /// Skipped for a recoverable reason (missing catalog metadata)
    pub fn is_skipped(&self) -> bool {
        matches!(&self.result, Err(e) if e.is_recoverable())
    }

    pub fn is_failed(&self) -> bool {
        matches!(&self.result, Err(e) if !e.is_recoverable())
    }

    /// Where the tagged FLAC was written
    pub fn output(&self) -> PathBuf {
        source::flac_path_for(&self.source)
    }
}

/// Outcomes of a run, in input order
#[derive(Debug, Default)]
pub struct RunReport {
    pub outcomes: Vec<FileOutcome>,
}

impl RunReport {
    pub fn converted(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_done()).count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_skipped()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failed()).count()
    }
}

/// Sequential WAV → tagged FLAC converter
pub struct Pipeline<C, A, E> {
    catalog: C,
    artwork: A,
    encoder: E,
    artwork_config: ArtworkConfig,
}

impl<C, A, E> Pipeline<C, A, E>
where
    C: CatalogApi,
    A: ArtworkApi,
    E: EncoderApi,
{
    pub fn new(catalog: C, artwork: A, encoder: E, artwork_config: ArtworkConfig) -> Self {
        Self {
            catalog,
            artwork,
            encoder,
            artwork_config,
        }
    }

    /// Process every file in order. Never fails as a whole.
    pub async fn run(&self, files: &[PathBuf]) -> RunReport {
        let mut report = RunReport::default();
        for (i, path) in files.iter().enumerate() {
            tracing::info!("[{}/{}] Inspecting {}", i + 1, files.len(), path.display());
            report.outcomes.push(self.process(path).await);
        }
        report
    }

    /// Process one file, catching every error and panic at this boundary.
    pub async fn process(&self, path: &Path) -> FileOutcome {
        let mut stage = Stage::Start;

        let result = AssertUnwindSafe(self.process_file(path, &mut stage))
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| Err(ConvertError::Defect(panic_message(panic.as_ref()))));

        match &result {
            Ok(_) => {
                stage = Stage::Done;
                tracing::info!(file = %path.display(), "Done");
            }
            Err(e) if e.is_recoverable() => {
                tracing::warn!(file = %path.display(), "{}. Skipping", e);
            }
            Err(e @ ConvertError::Defect(_)) => {
                tracing::error!(
                    file = %path.display(),
                    ?stage,
                    "Hey you found a bug! This file has to be skipped. \
                     Please file an issue with the track name and this message: {}",
                    e
                );
            }
            Err(e) => {
                tracing::error!(file = %path.display(), ?stage, kind = e.kind(), "{}", e);
            }
        }

        FileOutcome {
            source: path.to_path_buf(),
            stage,
            result,
        }
    }

    async fn process_file(&self, path: &Path, stage: &mut Stage) -> Result<FileTags> {
        if !path.exists() {
            return Err(ConvertError::SourceNotFound(path.to_path_buf()));
        }

        let id = source::extract_id(path)?;
        *stage = Stage::IdExtracted;
        tracing::info!(%id, "Retrieved id");

        tracing::info!("Connecting to the catalog to retrieve metadata");
        let metadata = self.catalog.lookup(&id).await?;
        *stage = Stage::MetadataResolved;
        tracing::info!(
            title = %metadata.title(),
            artist = %metadata.artist,
            release = %metadata.release,
            "Resolved metadata"
        );

        let artwork = self.prepare_artwork(&metadata).await?;
        if artwork.is_some() {
            *stage = Stage::ArtworkReady;
        }

        let exit = self
            .encoder
            .convert(path, artwork.as_ref().map(ArtworkAsset::path))
            .await;
        // The encoder has read the artwork by now, whatever its outcome
        if let Some(asset) = artwork
            && let Err(e) = asset.close()
        {
            tracing::warn!("Could not delete temporary artwork: {}", e);
        }
        let exit = exit?;
        if !exit.success() {
            return Err(ConvertError::encoding(path, exit.to_string()));
        }

        let output = source::flac_path_for(path);
        if !output.exists() {
            return Err(ConvertError::OutputMissing {
                input: path.to_path_buf(),
                output,
            });
        }
        *stage = Stage::Converted;

        metadata::restrict_permissions(&output)?;
        metadata::write(&output, &metadata)?;
        *stage = Stage::Tagged;

        let tags = metadata::read_tags(&output)?;
        tracing::info!(
            title = tags.title.as_deref().unwrap_or_default(),
            artist = tags.artist.as_deref().unwrap_or_default(),
            album = tags.album.as_deref().unwrap_or_default(),
            date = tags.date.as_deref().unwrap_or_default(),
            genre = tags.genre.as_deref().unwrap_or_default(),
            "Tagged {}",
            output.display()
        );

        Ok(tags)
    }

    /// Download the cover into a temporary file, honoring the failure policy.
    async fn prepare_artwork(&self, metadata: &TrackMetadata) -> Result<Option<ArtworkAsset>> {
        if !self.artwork_config.enabled {
            return Ok(None);
        }
        let Some(url) = metadata.artwork_url.as_deref() else {
            return Ok(None);
        };

        tracing::info!("Downloading album artwork");
        match self.fetch_artwork(url).await {
            Ok(asset) => Ok(Some(asset)),
            Err(e) => match self.artwork_config.policy {
                ArtworkPolicy::Strict => Err(e),
                ArtworkPolicy::FailSoft => {
                    tracing::warn!("{}. Converting without artwork", e);
                    Ok(None)
                }
            },
        }
    }

    async fn fetch_artwork(&self, url: &str) -> Result<ArtworkAsset> {
        let bytes = self.artwork.download(url).await?;
        ArtworkAsset::from_bytes(&bytes, self.artwork_config.temp_dir.as_deref())
            .map_err(|e| ConvertError::transport(format!("artwork could not be saved: {e}")))
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
