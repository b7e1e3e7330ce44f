//! DTO normalizer.
//!
//! Pure conversion from raw upstream payloads to the stable `CatalogItem`
//! shape. Total over any payload carrying an `id` and at least one of
//! `title`/`name`; absent optional fields map to defined defaults.

use chrono::NaiveDate;

use reel_core::types::CatalogItem;

use crate::api::RawCatalogItem;

/// Normalize a raw upstream entry into a stable catalog DTO.
///
/// Fallbacks: `title` falls back to `name`, `release_date` to
/// `first_air_date`. Missing `overview` becomes the empty string, missing
/// `score` becomes `0.0`. Unparsable or empty date strings map to `None`
/// rather than failing the whole payload.
pub fn normalize(raw: &RawCatalogItem) -> CatalogItem {
    let title = raw
        .title
        .as_deref()
        .or(raw.name.as_deref())
        .unwrap_or_default()
        .to_string();

    let release_date = raw
        .release_date
        .as_deref()
        .or(raw.first_air_date.as_deref())
        .and_then(parse_date);

    CatalogItem {
        id: raw.id,
        title,
        poster: raw.poster_path.clone(),
        backdrop: raw.backdrop_path.clone(),
        release_date,
        overview: raw.overview.clone().unwrap_or_default(),
        score: raw.vote_average.unwrap_or(0.0),
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    // Upstream sends empty strings for unknown dates
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests;
