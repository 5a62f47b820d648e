use serde::{Deserialize, Serialize};

pub const MAX_TITLE_LEN: usize = 250;
pub const MAX_DESCRIPTION_LEN: usize = 500;
pub const MAX_REVIEW_LEN: usize = 250;
pub const MAX_IMG_URL_LEN: usize = 250;

/// A movie in the personal catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: i64,
    pub title: String,
    pub year: i32,
    pub description: String,
    /// None until the entry has been reviewed at least once.
    pub rating: Option<f64>,
    /// 1-based position by descending rating, refreshed on every listing.
    pub ranking: i64,
    pub review: String,
    pub img_url: String,
}

/// Everything needed to insert a new entry, the id is assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCatalogEntry {
    pub title: String,
    pub year: i32,
    pub description: String,
    pub rating: Option<f64>,
    pub ranking: i64,
    pub review: String,
    pub img_url: String,
}
