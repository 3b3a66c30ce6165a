//! Staged builder walkthrough against a local axum server

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use axum::extract::{Json, Query};
use axum::http::HeaderMap;
use axum::routing::{get, post};
use niupee::{
    AbortSignal, CacheControlSuggest, ExpectedType, MimeType, RequestHeaderSetters, TransportConfig,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Serialize, Deserialize, Debug)]
struct SearchResult {
    query: Vec<(String, String)>,
    accept: String,
}

#[derive(Serialize, Deserialize, Debug)]
struct NewUser {
    username: String,
    permissions: Vec<String>,
}

async fn search(Query(query): Query<Vec<(String, String)>>, headers: HeaderMap) -> Json<SearchResult> {
    let accept = headers
        .get("accept")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    Json(SearchResult { query, accept })
}

async fn create_user(Json(user): Json<NewUser>) -> Json<serde_json::Value> {
    Json(json!({"created": user.username, "roles": user.permissions.len()}))
}

async fn slow() -> &'static str {
    tokio::time::sleep(Duration::from_secs(3)).await;
    "finally"
}

async fn start_server() -> Result<SocketAddr, Box<dyn std::error::Error>> {
    let app = Router::new()
        .route("/search", get(search))
        .route("/users", post(create_user))
        .route("/slow", get(slow));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server stopped: {e}");
        }
    });
    Ok(addr)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    niupee::init_transports(TransportConfig::default().with_user_agent("niupee-demo/0.1"))?;
    let addr = start_server().await?;

    // 1. Query editing and an XHR-style request with progress
    let response = niupee::get(format!("http://{addr}/search?page=1&tag=a&tag=b"))?
        .replace_query([("tag", "rust")])
        .add_query([("page", "2")])
        .ready_for_headers()
        .accept_suggest(MimeType::Json)
        .xhr_fire(())
        .with_timeout(5_000)
        .on_download(|event| println!("downloaded {} of {:?} bytes", event.loaded, event.total))
        .expect(ExpectedType::Json)
        .fire()
        .await?;
    let result: Option<SearchResult> = response.deserialize();
    println!("search -> {} {:?}", response.status, result);

    // 2. Fetch-style POST with a JSON body
    let user = NewUser {
        username: "niu".to_string(),
        permissions: vec!["read".to_string(), "write".to_string()],
    };
    let response = niupee::post(format!("http://{addr}/users"))?
        .ready_for_headers()
        .content_type_suggest(MimeType::Json)
        .cache_control_suggest(CacheControlSuggest::NoStore)
        .fetch_fire(niupee::RequestBody::json(&user)?)
        .no_store()
        .expect(ExpectedType::Json)
        .fire()
        .await?;
    println!("create -> {} {:?}", response.status, response.data.as_json());

    // 3. Cancelling before the response arrives
    let pending = niupee::get(format!("http://{addr}/slow"))?
        .ready_for_headers()
        .fetch_fire(())
        .with_signal(AbortSignal::timeout(Duration::from_secs(10)))
        .fire();
    let cancel = pending.cancel_handle();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        cancel.cancel();
    });
    match pending.await {
        Ok(response) => println!("slow -> {}", response.status),
        Err(e) => println!("slow -> {} ({e})", e.tag()),
    }

    let cache = &niupee::global_transports().cache;
    println!(
        "cache: {} entries, {} hits, {} misses",
        cache.len(),
        cache.stats().hits(),
        cache.stats().misses()
    );
    Ok(())
}
