//! TMDB wire types and the provider-neutral shapes handed to the catalog.

use serde::{Deserialize, Serialize};

/// One candidate from a title search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub provider_id: i64,
    pub display_title: String,
    pub release_date_hint: Option<String>,
    pub poster_path_hint: Option<String>,
}

/// Details of a single movie as needed to create a catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieDetail {
    pub original_title: String,
    pub overview: String,
    pub release_date: Option<String>,
    pub poster_path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TmdbSearchResponse {
    #[serde(default)]
    pub results: Vec<TmdbSearchItem>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TmdbSearchItem {
    pub id: i64,
    pub title: Option<String>,
    pub original_title: Option<String>,
    pub release_date: Option<String>,
    pub poster_path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TmdbMovieDetail {
    pub original_title: String,
    #[serde(default)]
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub poster_path: Option<String>,
}

impl From<TmdbSearchItem> for SearchResult {
    fn from(item: TmdbSearchItem) -> Self {
        SearchResult {
            provider_id: item.id,
            display_title: item.title.or(item.original_title).unwrap_or_default(),
            release_date_hint: item.release_date.filter(|d| !d.is_empty()),
            poster_path_hint: item.poster_path,
        }
    }
}

impl From<TmdbMovieDetail> for MovieDetail {
    fn from(detail: TmdbMovieDetail) -> Self {
        MovieDetail {
            original_title: detail.original_title,
            overview: detail.overview.unwrap_or_default(),
            release_date: detail.release_date,
            poster_path: detail.poster_path,
        }
    }
}
