//! Movie Catalog Server Library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod catalog;
pub mod config;
pub mod movie_store;
pub mod server;
pub mod sqlite_persistence;
pub mod tmdb;

// Re-export commonly used types for convenience
pub use catalog::{CatalogError, MovieCatalog};
pub use movie_store::{MovieStore, SqliteMovieStore};
pub use server::{make_app, run_server, FormTokens, RequestsLoggingLevel, ServerConfig};
pub use tmdb::{MovieMetadataProvider, TmdbClient};
