//! Unit tests for the catalog gateway

use super::*;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use serde_json::json;

/// Fake transport that counts invocations and replays canned responses
struct FakeFetch {
    calls: AtomicUsize,
    responses: Mutex<Vec<GatewayResult<Value>>>,
    last_path: Mutex<Option<String>>,
}

impl FakeFetch {
    fn new(responses: Vec<GatewayResult<Value>>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            responses: Mutex::new(responses),
            last_path: Mutex::new(None),
        }
    }

    fn single(response: GatewayResult<Value>) -> Self {
        Self::new(vec![response])
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<'a> Fetch for &'a FakeFetch {
    async fn get_json(&self, path: &str, _params: &[(&str, String)]) -> GatewayResult<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_path.lock().unwrap() = Some(path.to_string());
        let mut responses = self.responses.lock().unwrap();
        if responses.len() > 1 {
            responses.remove(0)
        } else {
            responses[0].as_ref().map(Clone::clone).map_err(clone_error)
        }
    }
}

/// GatewayError carries an io::Error source and is not Clone; rebuild the
/// variants the tests use.
fn clone_error(error: &GatewayError) -> GatewayError {
    match error {
        GatewayError::Upstream { status, detail } => GatewayError::Upstream {
            status: *status,
            detail: detail.clone(),
        },
        GatewayError::RateLimited { retry_after } => GatewayError::RateLimited {
            retry_after: *retry_after,
        },
        other => GatewayError::network(other.to_string()),
    }
}

fn list_payload() -> Value {
    json!({
        "page": 1,
        "total_pages": 5,
        "results": [
            { "id": 101, "title": "The Matrix", "vote_average": 8.2 },
            { "id": 102, "name": "Inception" }
        ]
    })
}

fn gateway(fetch: &FakeFetch) -> CatalogGateway<&FakeFetch> {
    CatalogGateway::new(fetch, CacheTtls::default())
}

#[tokio::test]
async fn test_trending_normalizes_and_paginates() {
    let fetch = FakeFetch::single(Ok(list_payload()));
    let gateway = gateway(&fetch);

    let page = gateway
        .trending(MediaType::Movie, TimeWindow::Day, 1)
        .await
        .unwrap();

    assert_eq!(page.page, 1);
    assert_eq!(page.total_pages, 5);
    assert_eq!(page.results.len(), 2);
    assert_eq!(page.results[0].title, "The Matrix");
    // The name-only TV shape normalizes through the same path
    assert_eq!(page.results[1].title, "Inception");
    assert_eq!(page.results[1].score, 0.0);
    assert_eq!(
        fetch.last_path.lock().unwrap().as_deref(),
        Some("/trending/movie/day")
    );
}

#[tokio::test]
async fn test_cache_hit_avoids_upstream_call() {
    let fetch = FakeFetch::single(Ok(list_payload()));
    let gateway = gateway(&fetch);

    let first = gateway
        .trending(MediaType::Movie, TimeWindow::Day, 1)
        .await
        .unwrap();
    let second = gateway
        .trending(MediaType::Movie, TimeWindow::Day, 1)
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(fetch.calls(), 1);
}

#[tokio::test]
async fn test_distinct_parameters_do_not_share_cache() {
    let fetch = FakeFetch::single(Ok(list_payload()));
    let gateway = gateway(&fetch);

    gateway
        .trending(MediaType::Movie, TimeWindow::Day, 1)
        .await
        .unwrap();
    gateway
        .trending(MediaType::Tv, TimeWindow::Day, 1)
        .await
        .unwrap();
    gateway
        .trending(MediaType::Movie, TimeWindow::Week, 1)
        .await
        .unwrap();

    assert_eq!(fetch.calls(), 3);
}

#[tokio::test]
async fn test_errors_propagate_and_are_never_cached() {
    let fetch = FakeFetch::single(Err(GatewayError::Upstream {
        status: 502,
        detail: "bad gateway".to_string(),
    }));
    let gateway = gateway(&fetch);

    for _ in 0..2 {
        let result = gateway.details(550).await;
        assert!(matches!(
            result,
            Err(GatewayError::Upstream { status: 502, .. })
        ));
    }
    // The second call went upstream again: the failure was not cached
    assert_eq!(fetch.calls(), 2);
    assert_eq!(gateway.cache().stats().total_entries, 0);
}

#[tokio::test]
async fn test_details_caches_single_item() {
    let fetch = FakeFetch::single(Ok(json!({
        "id": 550,
        "title": "Fight Club",
        "release_date": "1999-10-15",
        "vote_average": 8.4
    })));
    let gateway = gateway(&fetch);

    let first = gateway.details(550).await.unwrap();
    let second = gateway.details(550).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.title, "Fight Club");
    assert_eq!(fetch.calls(), 1);
    assert_eq!(
        fetch.last_path.lock().unwrap().as_deref(),
        Some("/movie/550")
    );
}

#[tokio::test]
async fn test_search_blank_query_fails_fast() {
    let fetch = FakeFetch::single(Ok(list_payload()));
    let gateway = gateway(&fetch);

    for query in ["", "   ", "\t"] {
        let result = gateway.search(query, 1).await;
        assert!(matches!(result, Err(GatewayError::MissingQuery)));
    }
    // Validation failed before cache or network
    assert_eq!(fetch.calls(), 0);
}

#[tokio::test]
async fn test_search_key_normalizes_query() {
    let fetch = FakeFetch::single(Ok(list_payload()));
    let gateway = gateway(&fetch);

    gateway.search("  Matrix ", 1).await.unwrap();
    gateway.search("matrix", 1).await.unwrap();

    // Same normalized key, so the second lookup was a cache hit
    assert_eq!(fetch.calls(), 1);
}

#[tokio::test]
async fn test_page_zero_defaults_to_one() {
    let fetch = FakeFetch::single(Ok(json!({ "results": [] })));
    let gateway = gateway(&fetch);

    let page = gateway.recommendations(550, 0).await.unwrap();
    assert_eq!(page.page, 1);
    assert_eq!(page.total_pages, 1);
}

#[tokio::test]
async fn test_list_payload_without_results_is_invalid() {
    let fetch = FakeFetch::single(Ok(json!("not an object")));
    let gateway = gateway(&fetch);

    let result = gateway.search("matrix", 1).await;
    assert!(matches!(result, Err(GatewayError::InvalidPayload { .. })));
}

#[tokio::test]
async fn test_warm_trending_populates_cache_and_reports_failures() {
    let fetch = FakeFetch::new(vec![
        Ok(list_payload()),
        Err(GatewayError::Upstream {
            status: 503,
            detail: String::new(),
        }),
        Ok(list_payload()),
    ]);
    let gateway = gateway(&fetch);

    let report = gateway
        .warm_trending(MediaType::Movie, TimeWindow::Day, 3)
        .await;

    assert_eq!(report, WarmupReport { warmed: 2, failed: 1 });
    // Warm-up used the public cache-aside path: page 1 now hits the cache
    gateway
        .trending(MediaType::Movie, TimeWindow::Day, 1)
        .await
        .unwrap();
    assert_eq!(fetch.calls(), 3);
}

#[tokio::test]
async fn test_warm_details() {
    let fetch = FakeFetch::single(Ok(json!({ "id": 1, "title": "x" })));
    let gateway = gateway(&fetch);

    let report = gateway.warm_details(&[1, 2, 3]).await;
    assert_eq!(report.warmed, 3);
    assert_eq!(report.failed, 0);
    assert_eq!(gateway.cache().stats().fresh_entries, 3);
}
