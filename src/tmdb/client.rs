//! HTTP client for the TMDB v3 API.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error};

use super::models::{TmdbMovieDetail, TmdbSearchResponse};
use super::{MovieDetail, MovieMetadataProvider, SearchResult, UpstreamError};

pub const DEFAULT_TMDB_API_BASE: &str = "https://api.themoviedb.org/3";
const LANGUAGE: &str = "en-US";

pub struct TmdbClient {
    client: reqwest::Client,
    base_url: String,
}

impl TmdbClient {
    /// Create a new TMDB client.
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the API (e.g., "https://api.themoviedb.org/3")
    /// * `api_key` - Bearer token sent with every request, must not be empty
    /// * `timeout_sec` - Request timeout in seconds
    pub fn new(base_url: &str, api_key: &str, timeout_sec: u64) -> Result<Self> {
        if api_key.trim().is_empty() {
            bail!("TMDB API key must not be empty");
        }

        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", api_key.trim()))
            .context("TMDB API key contains characters not allowed in a header")?;
        auth_value.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth_value);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(timeout_sec))
            .build()
            .context("Failed to create HTTP client")?;

        // Ensure base_url doesn't have trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, UpstreamError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|err| {
                error!("TMDB request to {} failed: {}", path, err);
                UpstreamError::Transport(err)
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("TMDB request to {} failed with status {}", path, status);
            return Err(UpstreamError::Status {
                status: status.as_u16(),
            });
        }

        response.json::<T>().await.map_err(|err| {
            error!("Failed to parse TMDB response from {}: {}", path, err);
            UpstreamError::Decode(err)
        })
    }
}

#[async_trait]
impl MovieMetadataProvider for TmdbClient {
    async fn search_by_title(&self, title: &str) -> Result<Vec<SearchResult>, UpstreamError> {
        let response: TmdbSearchResponse = self
            .get_json(
                "/search/movie",
                &[("query", title), ("language", LANGUAGE), ("page", "1")],
            )
            .await?;
        Ok(response.results.into_iter().map(Into::into).collect())
    }

    async fn fetch_detail(&self, provider_id: i64) -> Result<MovieDetail, UpstreamError> {
        let detail: TmdbMovieDetail = self
            .get_json(&format!("/movie/{}", provider_id), &[("language", LANGUAGE)])
            .await?;
        Ok(detail.into())
    }
}
