//! Beatport catalog integration - resolves a track id into tag metadata.
//!
//! # Architecture
//!
//! - **Domain models** (`domain.rs`) - the normalized [`TrackMetadata`]
//! - **API DTOs** (`dto.rs`) - exact response shapes, every field optional
//! - **Adapter** (`adapter.rs`) - DTO → domain, required-field enforcement
//!   and the artist join rule
//! - **Client** (`client.rs`) - the HTTP request itself

pub mod adapter;
mod client;
pub mod domain;
pub mod dto;

pub use client::{CatalogClient, DEFAULT_BASE_URL, build_http_client, parse_response};
pub use domain::{ReleaseDate, TrackMetadata};
