mod models;
mod schema;
mod sqlite_movie_store;

pub use models::*;
pub use schema::MOVIES_VERSIONED_SCHEMAS;
pub use sqlite_movie_store::SqliteMovieStore;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MovieStoreError {
    #[error("No movie with id {0}")]
    NotFound(i64),

    #[error("A movie titled \"{0}\" is already in the catalog")]
    DuplicateTitle(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type MovieStoreResult<T> = std::result::Result<T, MovieStoreError>;

/// Durable storage of catalog entries. Every mutating call commits on its own.
pub trait MovieStore: Send + Sync {
    /// All entries, highest rating first. Unrated entries come last and ties
    /// keep insertion order.
    fn list_all(&self) -> MovieStoreResult<Vec<CatalogEntry>>;
    fn get_by_id(&self, id: i64) -> MovieStoreResult<CatalogEntry>;
    /// Returns the id assigned to the new entry.
    fn insert(&self, entry: &NewCatalogEntry) -> MovieStoreResult<i64>;
    fn update_review_and_rating(&self, id: i64, rating: f64, review: &str)
        -> MovieStoreResult<()>;
    fn update_ranking(&self, id: i64, ranking: i64) -> MovieStoreResult<()>;
    fn delete(&self, id: i64) -> MovieStoreResult<()>;
    fn count(&self) -> MovieStoreResult<usize>;
}
