//! Movie catalog lifecycle: search, add, review, delete and ranked listing.

mod derivation;
mod movie_catalog;

pub use derivation::{
    assign_rankings, poster_url, truncate_chars, year_from_release_date, DEFAULT_IMAGE_BASE_URL,
};
pub use movie_catalog::{validate_rating, validate_review, MovieCatalog, MAX_RATING, MIN_RATING};

use crate::movie_store::MovieStoreError;
use crate::tmdb::UpstreamError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("No movie with id {0}")]
    NotFound(i64),

    #[error("A movie titled \"{0}\" is already in the catalog")]
    DuplicateTitle(String),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("Incomplete movie data from provider: {0}")]
    IncompleteDetail(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error(transparent)]
    Store(MovieStoreError),
}

impl From<MovieStoreError> for CatalogError {
    fn from(err: MovieStoreError) -> Self {
        match err {
            MovieStoreError::NotFound(id) => CatalogError::NotFound(id),
            MovieStoreError::DuplicateTitle(title) => CatalogError::DuplicateTitle(title),
            other => CatalogError::Store(other),
        }
    }
}

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;
