//! Serializable page models handed to whatever renders the UI.

use serde::Serialize;

use crate::catalog::poster_url;
use crate::movie_store::CatalogEntry;
use crate::tmdb::SearchResult;

#[derive(Debug, Serialize)]
pub struct MovieView {
    pub id: i64,
    pub title: String,
    pub year: i32,
    pub description: String,
    pub rating: Option<f64>,
    pub ranking: i64,
    pub review: String,
    pub img_url: String,
    pub edit_url: String,
    pub delete_url: String,
}

impl From<CatalogEntry> for MovieView {
    fn from(entry: CatalogEntry) -> Self {
        MovieView {
            edit_url: format!("/edit/{}", entry.id),
            delete_url: format!("/delete/{}", entry.id),
            id: entry.id,
            title: entry.title,
            year: entry.year,
            description: entry.description,
            rating: entry.rating,
            ranking: entry.ranking,
            review: entry.review,
            img_url: entry.img_url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListingView {
    pub movies: Vec<MovieView>,
}

#[derive(Debug, Serialize)]
pub struct AddFormView {
    pub csrf_token: String,
    pub title: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CandidateView {
    pub provider_id: i64,
    pub title: String,
    pub release_date: Option<String>,
    pub poster_url: Option<String>,
    pub select_url: String,
}

impl CandidateView {
    pub fn new(result: SearchResult, image_base_url: &str) -> Self {
        CandidateView {
            select_url: format!("/add?id={}", result.provider_id),
            poster_url: result
                .poster_path_hint
                .as_deref()
                .map(|path| poster_url(image_base_url, path)),
            provider_id: result.provider_id,
            title: result.display_title,
            release_date: result.release_date_hint,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SelectView {
    pub query: String,
    pub candidates: Vec<CandidateView>,
}

#[derive(Debug, Serialize)]
pub struct EditFormView {
    pub movie: MovieView,
    pub csrf_token: String,
    /// Values shown in the form, the submitted ones when re-rendering errors.
    pub rating: String,
    pub review: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorView {
    pub error: String,
}
