//! Trait definitions for the pipeline's external collaborators.
//!
//! These traits enable dependency injection and mocking for tests.
//! Production code uses the real catalog, artwork and encoder
//! implementations, while tests substitute the mocks below.
//!
//! # Example
//!
//! ```ignore
//! use beatport2flac::traits::CatalogApi;
//!
//! async fn title<C: CatalogApi>(catalog: &C, id: &TrackId) -> Result<String> {
//!     Ok(catalog.lookup(id).await?.title())
//! }
//! ```

use async_trait::async_trait;
use std::path::Path;

use crate::artwork::ArtworkClient;
use crate::catalog::{CatalogClient, TrackMetadata};
use crate::encoder::{EncoderExit, FlacEncoder};
use crate::error::Result;
use crate::source::TrackId;

/// Track metadata lookup.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Fetch and normalize the metadata for one track.
    async fn lookup(&self, id: &TrackId) -> Result<TrackMetadata>;
}

/// Cover art download.
#[async_trait]
pub trait ArtworkApi: Send + Sync {
    /// Download raw image bytes.
    async fn download(&self, url: &str) -> Result<Vec<u8>>;
}

/// Lossless encoder invocation.
#[async_trait]
pub trait EncoderApi: Send + Sync {
    /// Encode `source` next to itself, embedding `artwork` when given.
    async fn convert(&self, source: &Path, artwork: Option<&Path>) -> Result<EncoderExit>;
}

// Implement traits for real clients

#[async_trait]
impl CatalogApi for CatalogClient {
    async fn lookup(&self, id: &TrackId) -> Result<TrackMetadata> {
        self.lookup(id).await
    }
}

#[async_trait]
impl ArtworkApi for ArtworkClient {
    async fn download(&self, url: &str) -> Result<Vec<u8>> {
        self.download(url).await
    }
}

#[async_trait]
impl EncoderApi for FlacEncoder {
    async fn convert(&self, source: &Path, artwork: Option<&Path>) -> Result<EncoderExit> {
        self.convert(source, artwork).await
    }
}
