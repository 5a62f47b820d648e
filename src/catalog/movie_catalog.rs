use std::sync::Arc;

use tracing::{debug, info, warn};

use super::derivation::{assign_rankings, poster_url, truncate_chars, year_from_release_date};
use super::{CatalogError, CatalogResult};
use crate::movie_store::{
    CatalogEntry, MovieStore, MovieStoreError, NewCatalogEntry, MAX_DESCRIPTION_LEN,
    MAX_IMG_URL_LEN, MAX_REVIEW_LEN, MAX_TITLE_LEN,
};
use crate::tmdb::{MovieMetadataProvider, SearchResult};

pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 10.0;

/// Drives the life of catalog entries: adding them from the metadata
/// provider, reviewing, deleting and ranked listing.
pub struct MovieCatalog {
    store: Arc<dyn MovieStore>,
    provider: Arc<dyn MovieMetadataProvider>,
    image_base_url: String,
}

impl MovieCatalog {
    pub fn new(
        store: Arc<dyn MovieStore>,
        provider: Arc<dyn MovieMetadataProvider>,
        image_base_url: &str,
    ) -> Self {
        Self {
            store,
            provider,
            image_base_url: image_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Every entry ranked by descending rating.
    ///
    /// Rankings are written back to the store for entries whose position
    /// changed since the previous listing.
    pub fn ranked_listing(&self) -> CatalogResult<Vec<CatalogEntry>> {
        let mut entries = self.store.list_all()?;
        let changed = assign_rankings(&mut entries);
        if !changed.is_empty() {
            debug!("Updating ranking of {} entries", changed.len());
        }
        for (id, ranking) in changed {
            self.store.update_ranking(id, ranking)?;
        }
        Ok(entries)
    }

    /// Candidates from the provider for a free-text title. Nothing is stored.
    pub async fn search(&self, title: &str) -> CatalogResult<Vec<SearchResult>> {
        let title = title.trim();
        if title.is_empty() {
            return Err(CatalogError::InvalidInput("Movie title is required".to_string()));
        }
        let results = self.provider.search_by_title(title).await?;
        debug!("Search for {:?} returned {} candidates", title, results.len());
        Ok(results)
    }

    /// Adds the provider movie `provider_id` to the catalog with an empty
    /// review and returns the id of the new entry.
    pub async fn select(&self, provider_id: i64) -> CatalogResult<i64> {
        let detail = self.provider.fetch_detail(provider_id).await?;

        let year = detail
            .release_date
            .as_deref()
            .and_then(year_from_release_date)
            .ok_or_else(|| {
                CatalogError::IncompleteDetail(format!(
                    "movie {} has no usable release date",
                    provider_id
                ))
            })?;
        let poster_path = detail
            .poster_path
            .filter(|p| !p.is_empty())
            .ok_or_else(|| {
                CatalogError::IncompleteDetail(format!("movie {} has no poster", provider_id))
            })?;
        let title = detail.original_title.trim();
        if title.is_empty() {
            return Err(CatalogError::IncompleteDetail(format!(
                "movie {} has no title",
                provider_id
            )));
        }

        let img_url = poster_url(&self.image_base_url, &poster_path);
        if img_url.chars().count() > MAX_IMG_URL_LEN {
            return Err(CatalogError::IncompleteDetail(format!(
                "movie {} has a poster URL longer than {} characters",
                provider_id, MAX_IMG_URL_LEN
            )));
        }

        let entry = NewCatalogEntry {
            title: truncate_chars(title, MAX_TITLE_LEN),
            year,
            description: truncate_chars(&detail.overview, MAX_DESCRIPTION_LEN),
            rating: Some(0.0),
            ranking: 0,
            review: String::new(),
            img_url,
        };

        match self.store.insert(&entry) {
            Ok(id) => {
                info!("Added \"{}\" ({}) to the catalog as #{}", entry.title, year, id);
                Ok(id)
            }
            Err(MovieStoreError::DuplicateTitle(title)) => {
                warn!("Refusing to add \"{}\" twice", title);
                Err(CatalogError::DuplicateTitle(title))
            }
            Err(err) => Err(err.into()),
        }
    }

    pub fn entry(&self, id: i64) -> CatalogResult<CatalogEntry> {
        Ok(self.store.get_by_id(id)?)
    }

    /// Sets rating and review of entry `id`. Submitting the same values again
    /// leaves the entry unchanged.
    pub fn review(&self, id: i64, rating: f64, review: &str) -> CatalogResult<CatalogEntry> {
        validate_rating(rating)?;
        let review = validate_review(review)?;
        self.store.update_review_and_rating(id, rating, review)?;
        info!("Reviewed movie #{}: rating {}", id, rating);
        self.entry(id)
    }

    pub fn delete(&self, id: i64) -> CatalogResult<()> {
        self.store.delete(id)?;
        info!("Deleted movie #{}", id);
        Ok(())
    }

    pub fn count(&self) -> CatalogResult<usize> {
        Ok(self.store.count()?)
    }

    pub fn image_base_url(&self) -> &str {
        &self.image_base_url
    }
}

pub fn validate_rating(rating: f64) -> CatalogResult<()> {
    if !rating.is_finite() || !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(CatalogError::InvalidInput(format!(
            "Rating must be between {} and {}",
            MIN_RATING, MAX_RATING
        )));
    }
    Ok(())
}

pub fn validate_review(review: &str) -> CatalogResult<&str> {
    let review = review.trim();
    if review.is_empty() {
        return Err(CatalogError::InvalidInput("Review is required".to_string()));
    }
    if review.chars().count() > MAX_REVIEW_LEN {
        return Err(CatalogError::InvalidInput(format!(
            "Review must be at most {} characters",
            MAX_REVIEW_LEN
        )));
    }
    Ok(review)
}
