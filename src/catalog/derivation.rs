//! Pure helpers turning provider data into catalog fields.

use crate::movie_store::CatalogEntry;

pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Release year from a provider date such as "1994-09-23".
///
/// Only the first four characters are considered, so "1994" and "1994-09"
/// work too. Returns None when they are not all ASCII digits.
pub fn year_from_release_date(release_date: &str) -> Option<i32> {
    let prefix = release_date.get(..4)?;
    if !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    prefix.parse().ok()
}

/// Poster URL obtained by appending the provider path to the image base.
pub fn poster_url(image_base_url: &str, poster_path: &str) -> String {
    format!("{}{}", image_base_url, poster_path)
}

/// Truncates to at most `max_chars` characters, never splitting a char.
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((byte_index, _)) => s[..byte_index].to_string(),
        None => s.to_string(),
    }
}

/// Assigns 1-based rankings following the order of `entries`, which must
/// already be sorted by descending rating.
///
/// Returns the `(id, ranking)` pairs whose stored ranking changed.
pub fn assign_rankings(entries: &mut [CatalogEntry]) -> Vec<(i64, i64)> {
    let mut changed = Vec::new();
    for (index, entry) in entries.iter_mut().enumerate() {
        let ranking = index as i64 + 1;
        if entry.ranking != ranking {
            entry.ranking = ranking;
            changed.push((entry.id, ranking));
        }
    }
    changed
}
