use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use http::{Method, StatusCode};
use niupee::{
    CacheControlSuggest, CancelHandle, ErrorTag, ExpectedType, FetchEngine, MimeType,
    RequestDescriptor, RequestHeaderSetters, ResolvedResponse, ResponseData, TransportResult,
    XhrEngine,
};
use niupee_client::http::ResponseHead;
use niupee_client::transport::{MemoryResponse, MemoryTransport};
use serde_json::json;

#[test]
fn test_entry_points_reject_unusable_urls() {
    assert_eq!(niupee::get("not a url").unwrap_err().tag(), ErrorTag::Builder);
    assert!(niupee::post("ftp://files.test/x").unwrap_err().is_builder());
    tokio_test::assert_err!(niupee::head("mailto:someone@api.test"));
    tokio_test::assert_ok!(niupee::RequestManager::options("https://api.test/"));
}

#[test]
fn test_each_entry_point_sets_its_method() {
    let cases = [
        (niupee::get("http://a.test/").unwrap(), Method::GET),
        (niupee::post("http://a.test/").unwrap(), Method::POST),
        (niupee::put("http://a.test/").unwrap(), Method::PUT),
        (niupee::head("http://a.test/").unwrap(), Method::HEAD),
        (niupee::options("http://a.test/").unwrap(), Method::OPTIONS),
    ];
    for (stage, method) in cases {
        assert_eq!(stage.method(), &method);
    }
}

#[test]
fn test_query_editing_then_serialization() {
    let stage = niupee::get("http://pp.com/search?num=4").unwrap();
    assert_eq!(
        stage.clone().reset_query([("age", "15"), ("num", "30")]).ready_for_headers().url().as_str(),
        "http://pp.com/search?age=15&num=30"
    );
    assert_eq!(
        stage.reset_query(Vec::<(&str, &str)>::new()).ready_for_headers().url().as_str(),
        "http://pp.com/search"
    );

    let url = niupee::get("http://pp.com/search?num=4&age=3&num=9")
        .unwrap()
        .replace_query([("age", "3"), ("num", "10")])
        .add_query([("fruit", "apple")])
        .ready_for_headers()
        .url()
        .clone();
    assert_eq!(url.as_str(), "http://pp.com/search?age=3&num=10&fruit=apple");
}

#[test]
fn test_header_setters_last_write_wins() {
    let stage = niupee::get("http://a.test/")
        .unwrap()
        .ready_for_headers()
        .accept("text/html")
        .accept_suggest(MimeType::Json)
        .cache_control_suggest(CacheControlSuggest::NoStore)
        .request_headers([("Accept", "text/csv"), ("X-One", "1")]);

    assert_eq!(stage.headers().get("accept"), Some("text/csv"));
    assert_eq!(stage.headers().get("cache-control"), Some("no-store"));
    assert_eq!(stage.headers().len(), 3);
}

#[tokio::test]
async fn test_xhr_fire_over_memory_transport() {
    let body = json!({"msg": "hello", "to": "friend"});
    let transport = MemoryTransport::new().route(Method::GET, "/json", MemoryResponse::json(&body));

    let response = niupee::get("http://hello.com:8888/json")
        .unwrap()
        .ready_for_headers()
        .request_headers([("Content-Type", "application/json")])
        .xhr_fire(())
        .expect(ExpectedType::Json)
        .with_engine(XhrEngine::new(Arc::new(transport.clone())))
        .fire()
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.data.as_json(), Some(&body));
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_fetch_fire_only_if_cached_without_entry() {
    let transport = MemoryTransport::new();
    let engine = FetchEngine::new(Arc::new(niupee_client::cache::CachedFetch::new(
        transport.clone(),
        Arc::new(niupee_client::cache::ResponseCache::default()),
    )));

    let err = niupee::get("http://api.test/feed")
        .unwrap()
        .ready_for_headers()
        .fetch_fire(())
        .only_if_cached()
        .with_engine(engine)
        .fire()
        .await
        .unwrap_err();

    assert_eq!(err.tag(), ErrorTag::FetchHttpError);
    assert_eq!(err.status(), Some(504));
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_rejected_header_is_not_sent() {
    let transport = MemoryTransport::new();
    let result = niupee::post("http://api.test/items")
        .unwrap()
        .ready_for_headers()
        .header("X-Bad", "line\nbreak")
        .fetch_fire("payload")
        .with_engine(FetchEngine::new(Arc::new(transport.clone())))
        .fire();
    result.cancel();

    assert!(result.await.unwrap_err().is_not_sent());
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_closure_engine_receives_descriptor() {
    let seen = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&seen);
    let engine = move |descriptor: RequestDescriptor| {
        counter.fetch_add(1, Ordering::SeqCst);
        let echoed = format!(
            "{} {} {:?}",
            descriptor.method(),
            descriptor.url(),
            descriptor.timeout()
        );
        TransportResult::new(
            async move {
                let head = ResponseHead {
                    status: 200,
                    status_text: "OK".to_owned(),
                    headers: niupee::HeaderCollection::new(),
                };
                Ok(ResolvedResponse::new(head, ResponseData::Text(echoed)))
            },
            CancelHandle::noop(),
        )
    };

    let response = niupee::put("http://api.test/doc?rev=1")
        .unwrap()
        .ready_for_headers()
        .engine_fire(engine, "body")
        .with_timeout(1500)
        .fire()
        .await
        .unwrap();

    assert_eq!(
        response.data.as_text(),
        Some("PUT http://api.test/doc?rev=1 Some(1.5s)")
    );
    assert_eq!(seen.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_xhr_timeout_through_builder() {
    let transport = MemoryTransport::new().route(
        Method::GET,
        "/slow",
        MemoryResponse::new(StatusCode::OK).delay(Duration::from_millis(500)),
    );

    let err = niupee::get("http://api.test/slow")
        .unwrap()
        .ready_for_headers()
        .xhr_fire(())
        .with_timeout(20)
        .with_engine(XhrEngine::new(Arc::new(transport)))
        .fire()
        .await
        .unwrap_err();

    assert_eq!(err.tag(), ErrorTag::Timeout);
}
