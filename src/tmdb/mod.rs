//! Client for The Movie Database (TMDB), the metadata provider used to look
//! movies up before adding them to the catalog.

mod client;
mod models;

pub use client::{TmdbClient, DEFAULT_TMDB_API_BASE};
pub use models::{MovieDetail, SearchResult};

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Metadata provider responded with status {status}")]
    Status { status: u16 },

    #[error("Could not reach metadata provider: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Could not decode metadata provider response: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Source of movie metadata. One attempt per call, no retries.
#[async_trait]
pub trait MovieMetadataProvider: Send + Sync {
    async fn search_by_title(&self, title: &str) -> Result<Vec<SearchResult>, UpstreamError>;

    async fn fetch_detail(&self, provider_id: i64) -> Result<MovieDetail, UpstreamError>;
}
