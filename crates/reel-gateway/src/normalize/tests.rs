//! Unit tests for the DTO normalizer

use super::*;

use serde_json::json;

fn raw_from_json(value: serde_json::Value) -> RawCatalogItem {
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_minimal_tv_shape() {
    let raw = raw_from_json(json!({ "id": 42, "name": "The Wire" }));
    let item = normalize(&raw);

    assert_eq!(item.id, 42);
    assert_eq!(item.title, "The Wire");
    assert_eq!(item.overview, "");
    assert_eq!(item.score, 0.0);
    assert_eq!(item.poster, None);
    assert_eq!(item.backdrop, None);
    assert_eq!(item.release_date, None);
}

#[test]
fn test_movie_fields_take_precedence() {
    let raw = raw_from_json(json!({
        "id": 550,
        "title": "Fight Club",
        "name": "should not win",
        "poster_path": "/p.jpg",
        "backdrop_path": "/b.jpg",
        "release_date": "1999-10-15",
        "first_air_date": "2000-01-01",
        "overview": "An insomniac office worker...",
        "vote_average": 8.4
    }));
    let item = normalize(&raw);

    assert_eq!(item.title, "Fight Club");
    assert_eq!(item.poster.as_deref(), Some("/p.jpg"));
    assert_eq!(item.backdrop.as_deref(), Some("/b.jpg"));
    assert_eq!(
        item.release_date,
        chrono::NaiveDate::from_ymd_opt(1999, 10, 15)
    );
    assert_eq!(item.overview, "An insomniac office worker...");
    assert_eq!(item.score, 8.4);
}

#[test]
fn test_tv_date_fallback() {
    let raw = raw_from_json(json!({
        "id": 1,
        "name": "Show",
        "first_air_date": "2008-01-20"
    }));
    let item = normalize(&raw);
    assert_eq!(
        item.release_date,
        chrono::NaiveDate::from_ymd_opt(2008, 1, 20)
    );
}

#[test]
fn test_empty_and_garbage_dates_map_to_none() {
    let empty = raw_from_json(json!({ "id": 1, "title": "x", "release_date": "" }));
    assert_eq!(normalize(&empty).release_date, None);

    let garbage = raw_from_json(json!({ "id": 1, "title": "x", "release_date": "soon" }));
    assert_eq!(normalize(&garbage).release_date, None);
}

#[test]
fn test_idempotent_over_normalized_output() {
    let raw = raw_from_json(json!({
        "id": 550,
        "title": "Fight Club",
        "poster_path": "/p.jpg",
        "release_date": "1999-10-15",
        "overview": "An insomniac office worker...",
        "vote_average": 8.4
    }));
    let once = normalize(&raw);

    // Re-serialize the normalized item and feed it back through; aliases on
    // the raw type accept the normalized field names.
    let reparsed: RawCatalogItem =
        serde_json::from_value(serde_json::to_value(&once).unwrap()).unwrap();
    let twice = normalize(&reparsed);

    assert_eq!(twice, once);
}
