use std::sync::Arc;

use http::{Method, StatusCode};
use niupee_client::cache::{CacheConfig, CachedFetch, ResponseCache};
use niupee_client::prelude::*;
use niupee_client::transport::{MemoryResponse, MemoryTransport};

const URL: &str = "http://cache.test/feed";

fn cached(transport: &MemoryTransport) -> (FetchEngine, Arc<ResponseCache>) {
    let cache = Arc::new(ResponseCache::new(CacheConfig::default()));
    let fetch = CachedFetch::new(transport.clone(), Arc::clone(&cache));
    (FetchEngine::new(Arc::new(fetch)), cache)
}

fn request(directive: CacheDirective) -> RequestDescriptor {
    request_with(Method::GET, directive)
}

fn request_with(method: Method, directive: CacheDirective) -> RequestDescriptor {
    let options = FetchOptions {
        cache: directive,
        ..FetchOptions::default()
    };
    RequestDescriptor::new(method, Url::parse(URL).unwrap(), HeaderCollection::new(), RequestBody::Empty)
        .with_fetch_options(options)
}

async fn text(engine: &FetchEngine, directive: CacheDirective) -> String {
    let response = engine.fire(request(directive)).await.unwrap();
    response.data.as_text().unwrap().to_owned()
}

fn fresh(body: &str) -> MemoryResponse {
    MemoryResponse::text(body).header("cache-control", "max-age=600")
}

#[tokio::test]
async fn test_only_if_cached_without_entry_is_504_without_network() {
    let transport = MemoryTransport::new();
    let (engine, cache) = cached(&transport);

    let err = engine.fire(request(CacheDirective::OnlyIfCached)).await.unwrap_err();

    assert_eq!(err.tag(), ErrorTag::FetchHttpError);
    assert_eq!(err.status(), Some(504));
    assert_eq!(transport.calls(), 0);
    assert_eq!(cache.stats().misses(), 1);
}

#[tokio::test]
async fn test_default_serves_fresh_entry_from_cache() {
    let transport = MemoryTransport::new()
        .route(Method::GET, "/feed", fresh("v1"))
        .route(Method::GET, "/feed", fresh("v2"));
    let (engine, cache) = cached(&transport);

    assert_eq!(text(&engine, CacheDirective::Default).await, "v1");
    assert_eq!(text(&engine, CacheDirective::Default).await, "v1");

    assert_eq!(transport.calls(), 1);
    assert_eq!(cache.stats().hits(), 1);
}

#[tokio::test]
async fn test_no_store_never_reads_or_writes() {
    let transport = MemoryTransport::new()
        .route(Method::GET, "/feed", fresh("v1"))
        .route(Method::GET, "/feed", fresh("v2"));
    let (engine, cache) = cached(&transport);

    assert_eq!(text(&engine, CacheDirective::NoStore).await, "v1");
    assert!(cache.is_empty());
    assert_eq!(text(&engine, CacheDirective::NoStore).await, "v2");
    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn test_reload_fetches_and_updates_cache() {
    let transport = MemoryTransport::new()
        .route(Method::GET, "/feed", fresh("v1"))
        .route(Method::GET, "/feed", fresh("v2"));
    let (engine, _cache) = cached(&transport);

    assert_eq!(text(&engine, CacheDirective::Default).await, "v1");
    assert_eq!(text(&engine, CacheDirective::Reload).await, "v2");
    assert_eq!(text(&engine, CacheDirective::ForceCache).await, "v2");
    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn test_force_cache_uses_stale_entry() {
    let stale = MemoryResponse::text("stale").header("cache-control", "no-cache");
    let transport = MemoryTransport::new()
        .route(Method::GET, "/feed", stale)
        .route(Method::GET, "/feed", fresh("fresh"));
    let (engine, _cache) = cached(&transport);

    assert_eq!(text(&engine, CacheDirective::Default).await, "stale");
    assert_eq!(text(&engine, CacheDirective::ForceCache).await, "stale");
    assert_eq!(text(&engine, CacheDirective::OnlyIfCached).await, "stale");
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_no_cache_revalidates_with_etag() {
    let first = fresh("original").header("etag", "\"v1\"");
    let not_modified = MemoryResponse::new(StatusCode::NOT_MODIFIED).header("cache-control", "max-age=600");
    let transport = MemoryTransport::new()
        .route(Method::GET, "/feed", first)
        .route(Method::GET, "/feed", not_modified);
    let (engine, cache) = cached(&transport);

    assert_eq!(text(&engine, CacheDirective::Default).await, "original");
    assert_eq!(text(&engine, CacheDirective::NoCache).await, "original");

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(
        requests[1].headers.get("if-none-match").and_then(|v| v.to_str().ok()),
        Some("\"v1\"")
    );
    assert_eq!(cache.stats().validations(), 1);
}

#[tokio::test]
async fn test_successful_post_invalidates_entry() {
    let transport = MemoryTransport::new()
        .route(Method::GET, "/feed", fresh("v1"))
        .route(Method::GET, "/feed", fresh("v2"))
        .route(Method::POST, "/feed", MemoryResponse::new(StatusCode::CREATED));
    let (engine, cache) = cached(&transport);

    assert_eq!(text(&engine, CacheDirective::Default).await, "v1");
    assert_eq!(cache.len(), 1);

    engine
        .fire(request_with(Method::POST, CacheDirective::Default))
        .await
        .unwrap();
    assert!(cache.is_empty());

    assert_eq!(text(&engine, CacheDirective::Default).await, "v2");
}

#[tokio::test]
async fn test_error_statuses_are_not_stored() {
    let transport = MemoryTransport::new()
        .route(Method::GET, "/feed", MemoryResponse::new(StatusCode::INTERNAL_SERVER_ERROR))
        .route(Method::GET, "/feed", fresh("recovered"));
    let (engine, cache) = cached(&transport);

    let err = engine.fire(request(CacheDirective::Default)).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert!(cache.is_empty());
    assert_eq!(text(&engine, CacheDirective::Default).await, "recovered");
}
