//! SQLite schema definitions for the movie catalog database.

use crate::sqlite_column;
use crate::sqlite_persistence::{Column, SqlType, Table, VersionedSchema};

// =============================================================================
// Version 1 - Movies
// =============================================================================

const MOVIES_TABLE_V1: Table = Table {
    name: "movies",
    columns: &[
        sqlite_column!(
            "id",
            &SqlType::Integer,
            is_primary_key = true,
            is_autoincrement = true
        ),
        sqlite_column!("title", &SqlType::Text, non_null = true, is_unique = true),
        sqlite_column!("year", &SqlType::Integer, non_null = true),
        sqlite_column!("description", &SqlType::Text, non_null = true),
        sqlite_column!("rating", &SqlType::Real),
        sqlite_column!("ranking", &SqlType::Integer),
        sqlite_column!("review", &SqlType::Text),
        sqlite_column!("img_url", &SqlType::Text, non_null = true),
    ],
    indices: &[("idx_movies_rating", "rating DESC")],
};

pub const MOVIES_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 1,
    tables: &[MOVIES_TABLE_V1],
    migration: None,
}];
