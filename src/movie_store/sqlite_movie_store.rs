use super::models::{CatalogEntry, NewCatalogEntry};
use super::schema::MOVIES_VERSIONED_SCHEMAS;
use super::{MovieStore, MovieStoreError, MovieStoreResult};
use crate::sqlite_persistence::prepare_database;
use anyhow::Context;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

const ENTRY_COLUMNS: &str = "id, title, year, description, rating, ranking, review, img_url";

pub struct SqliteMovieStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteMovieStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> anyhow::Result<Self> {
        let path = db_path.as_ref();
        info!("Opening movie database at {:?}", path);
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open movie database at {:?}", path))?;
        Self::from_connection(conn)
    }

    pub fn in_memory() -> anyhow::Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(mut conn: Connection) -> anyhow::Result<Self> {
        prepare_database(&mut conn, MOVIES_VERSIONED_SCHEMAS, "movie")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> MovieStoreResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| MovieStoreError::Other(anyhow::anyhow!("Movie database lock poisoned")))
    }

    fn row_to_entry(row: &rusqlite::Row) -> rusqlite::Result<CatalogEntry> {
        Ok(CatalogEntry {
            id: row.get("id")?,
            title: row.get("title")?,
            year: row.get("year")?,
            description: row.get("description")?,
            rating: row.get("rating")?,
            ranking: row.get::<_, Option<i64>>("ranking")?.unwrap_or(0),
            review: row.get::<_, Option<String>>("review")?.unwrap_or_default(),
            img_url: row.get("img_url")?,
        })
    }

    fn is_unique_violation(err: &rusqlite::Error) -> bool {
        matches!(
            err,
            rusqlite::Error::SqliteFailure(e, _)
                if e.code == ErrorCode::ConstraintViolation
                    && e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
        )
    }

    fn expect_one_row(id: i64, changed: usize) -> MovieStoreResult<()> {
        if changed == 0 {
            Err(MovieStoreError::NotFound(id))
        } else {
            Ok(())
        }
    }
}

impl MovieStore for SqliteMovieStore {
    fn list_all(&self) -> MovieStoreResult<Vec<CatalogEntry>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM movies ORDER BY rating IS NULL, rating DESC, id ASC",
            ENTRY_COLUMNS
        ))?;
        let entries = stmt
            .query_map([], Self::row_to_entry)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(entries)
    }

    fn get_by_id(&self, id: i64) -> MovieStoreResult<CatalogEntry> {
        let conn = self.lock()?;
        conn.query_row(
            &format!("SELECT {} FROM movies WHERE id = ?1", ENTRY_COLUMNS),
            params![id],
            Self::row_to_entry,
        )
        .optional()?
        .ok_or(MovieStoreError::NotFound(id))
    }

    fn insert(&self, entry: &NewCatalogEntry) -> MovieStoreResult<i64> {
        let conn = self.lock()?;
        let result = conn.execute(
            "INSERT INTO movies (title, year, description, rating, ranking, review, img_url)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                entry.title,
                entry.year,
                entry.description,
                entry.rating,
                entry.ranking,
                entry.review,
                entry.img_url,
            ],
        );
        match result {
            Ok(_) => Ok(conn.last_insert_rowid()),
            Err(err) if Self::is_unique_violation(&err) => {
                Err(MovieStoreError::DuplicateTitle(entry.title.clone()))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn update_review_and_rating(
        &self,
        id: i64,
        rating: f64,
        review: &str,
    ) -> MovieStoreResult<()> {
        let conn = self.lock()?;
        let changed = conn.execute(
            "UPDATE movies SET rating = ?1, review = ?2 WHERE id = ?3",
            params![rating, review, id],
        )?;
        Self::expect_one_row(id, changed)
    }

    fn update_ranking(&self, id: i64, ranking: i64) -> MovieStoreResult<()> {
        let conn = self.lock()?;
        let changed = conn.execute(
            "UPDATE movies SET ranking = ?1 WHERE id = ?2",
            params![ranking, id],
        )?;
        Self::expect_one_row(id, changed)
    }

    fn delete(&self, id: i64) -> MovieStoreResult<()> {
        let conn = self.lock()?;
        let changed = conn.execute("DELETE FROM movies WHERE id = ?1", params![id])?;
        Self::expect_one_row(id, changed)
    }

    fn count(&self) -> MovieStoreResult<usize> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM movies", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
