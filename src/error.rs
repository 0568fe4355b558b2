//! Conversion error types.
//!
//! Library modules return [`ConvertError`] via `thiserror`, while the
//! CLI/main edge uses `anyhow` for startup failures (config, runtime).
//!
//! # Design
//!
//! Every variant except [`ConvertError::MissingMetadata`] is fatal for the
//! file being processed. None of them abort the run: the pipeline catches
//! each one at the per-file boundary and moves on to the next input.

use std::path::PathBuf;

/// Result type used throughout the conversion pipeline.
pub type Result<T> = std::result::Result<T, ConvertError>;

/// A per-file conversion failure.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// Source file does not exist
    #[error("File not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// Filename does not follow `<digits>_<anything>.wav`
    #[error(
        "Format of file {} does not match expected format of Beatport downloads",
        .0.display()
    )]
    FormatMismatch(PathBuf),

    /// Catalog or artwork request failed, or returned an unreadable body
    #[error("Request failed: {0}")]
    Transport(String),

    /// Catalog replied with JSON that has no `results` collection
    #[error("Catalog returned an object we were not expecting: {0}")]
    UnexpectedResponse(String),

    /// Catalog matched zero or several tracks for one id
    #[error("Catalog returned {count} items instead of 1")]
    UnexpectedResultCount { count: usize },

    /// Required fields absent from an otherwise valid catalog entry
    #[error("Could not find (or missing) track information: {}", .fields.join(", "))]
    MissingMetadata { fields: Vec<String> },

    /// Encoder could not be run or exited with a failure status
    #[error("Encoder did not execute successfully for {}: {status}", .file.display())]
    EncodingFailed { file: PathBuf, status: String },

    /// Encoder exited successfully but left no output behind
    #[error("{} file was not converted to {}", .input.display(), .output.display())]
    OutputMissing { input: PathBuf, output: PathBuf },

    /// Could not restrict permissions on the converted file
    #[error("Could not set permissions on {}: {source}", .path.display())]
    Permissions {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading or saving the converted file's tags failed
    #[error("Could not tag {}: {message}", .path.display())]
    TaggingFailed { path: PathBuf, message: String },

    /// A panic or other defect escaped the processing of a file
    #[error("Unexpected defect: {0}")]
    Defect(String),
}

impl ConvertError {
    /// Create a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Create an encoding error.
    pub fn encoding(file: impl Into<PathBuf>, status: impl Into<String>) -> Self {
        Self::EncodingFailed {
            file: file.into(),
            status: status.into(),
        }
    }

    /// Whether the run should treat this as a skip rather than a failure.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::MissingMetadata { .. })
    }

    /// Short, stable name of the failure category.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SourceNotFound(_) => "SourceNotFound",
            Self::FormatMismatch(_) => "FormatMismatch",
            Self::Transport(_) => "TransportError",
            Self::UnexpectedResponse(_) => "UnexpectedResponse",
            Self::UnexpectedResultCount { .. } => "UnexpectedResultCount",
            Self::MissingMetadata { .. } => "MissingMetadataError",
            Self::EncodingFailed { .. } => "EncodingFailed",
            Self::OutputMissing { .. } => "OutputMissing",
            Self::Permissions { .. } => "PermissionsFailed",
            Self::TaggingFailed { .. } => "TaggingFailed",
            Self::Defect(_) => "Defect",
        }
    }
}
