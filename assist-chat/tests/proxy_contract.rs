//! End-to-end contract tests: a fake retrieval backend, the real
//! `RagClient`, and the proxy router, all over real sockets.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::{Value, json};

use assist_chat::client::{RagClient, RagGateway};
use assist_chat::config::ClientConfig;
use assist_chat::server::{AppState, app_router};
use assist_core::cascade::{Level, available_at};
use assist_core::error::{DOCUMENT_NOT_FOUND_MESSAGE, STATUS_NO_RESPONSE, TIMEOUT_MESSAGE};
use assist_core::{SearchFilters, SearchRequest};

fn backend_metadata() -> Value {
    json!({
        "categories": ["機械", "電気"],
        "workTypes": ["重大故障", "修理票", "作業票", "連絡票"],
        "productionLines": ["L1", "L2"],
        "equipment1s": ["E1"],
        "equipment2s": ["E2a", "E2b"],
        "equipment3s": [],
        "yearRange": {"startYear": 2018, "endYear": 2024},
        "totalDocuments": 321,
        "hierarchy": [
            {"id": "A", "label": "A工場", "children": [
                {"id": "L1", "label": "L1", "children": [
                    {"id": "E1", "label": "E1", "children": [
                        {"id": "E2a", "label": "E2a", "children": []},
                        {"id": "E2b", "label": "E2b", "children": []}
                    ]}
                ]}
            ]},
            {"id": "B", "label": "B工場", "children": [
                {"id": "L2", "label": "L2", "children": []}
            ]}
        ]
    })
}

fn backend_router(feedback_calls: Arc<AtomicUsize>) -> Router {
    Router::new()
        .route("/health", get(|| async { Json(json!({"status": "ok"})) }))
        .route(
            "/api/search",
            post(|Json(request): Json<Value>| async move {
                let query = request["query"].as_str().unwrap_or_default().to_string();
                Json(json!({
                    "results": [{
                        "doc_id": "doc_000001",
                        "title": format!("hit for {query}"),
                        "summary": "",
                        "score": 0.87,
                        "confidence": 91,
                        "snippet": "",
                        "date": "2024-01-15T10:30:00Z",
                        "machine": null,
                        "line": "L1",
                        "category": "電気",
                        "match_fields": {"title": 0.9}
                    }],
                    "total": 1,
                    "processingTime": 12
                }))
            }),
        )
        .route(
            "/api/docs/{doc_id}",
            get(|Path(doc_id): Path<String>| async move {
                if doc_id == "doc_000001" {
                    Json(json!({
                        "doc_id": "doc_000001",
                        "title": "モーター異音",
                        "content": "本文",
                        "metadata": {},
                        "attachments": [],
                        "full_text": "本文全体",
                        "chunks": [{
                            "chunk_id": "doc_000001_0",
                            "text": "本文",
                            "chunk_index": 0,
                            "source_doc_id": "doc_000001"
                        }]
                    }))
                    .into_response()
                } else {
                    (
                        StatusCode::NOT_FOUND,
                        Json(json!({"error": DOCUMENT_NOT_FOUND_MESSAGE})),
                    )
                        .into_response()
                }
            }),
        )
        .route(
            "/api/search/metadata",
            get(|| async { Json(backend_metadata()) }),
        )
        .route(
            "/api/feedback",
            post(move |Json(_): Json<Value>| {
                let feedback_calls = feedback_calls.clone();
                async move {
                    feedback_calls.fetch_add(1, Ordering::SeqCst);
                    Json(json!({"success": true, "message": "フィードバックを受け付けました"}))
                }
            }),
        )
}

async fn spawn(app: Router) -> (String, tokio::task::JoinHandle<()>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener addr");

    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server run");
    });

    (format!("http://{}", addr), handle)
}

async fn spawn_stack() -> (String, Arc<AtomicUsize>, Vec<tokio::task::JoinHandle<()>>) {
    let feedback_calls = Arc::new(AtomicUsize::new(0));
    let (backend_base, backend_handle) = spawn(backend_router(feedback_calls.clone())).await;

    let client = RagClient::new(ClientConfig {
        base_url: backend_base,
        timeout: Duration::from_secs(5),
    })
    .expect("build client");
    let (proxy_base, proxy_handle) = spawn(app_router(AppState { gateway: Arc::new(client) })).await;

    (proxy_base, feedback_calls, vec![backend_handle, proxy_handle])
}

#[tokio::test]
async fn search_proxies_results_from_the_backend() {
    let (base, _, handles) = spawn_stack().await;
    let http = reqwest::Client::new();

    let request = SearchRequest {
        query: "モーター異音".to_string(),
        filters: Some(SearchFilters::default()),
        k: Some(20),
    };
    let response = http
        .post(format!("{}/api/search", base))
        .json(&request)
        .send()
        .await
        .expect("search response");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("search json");
    assert_eq!(body["total"], 1);
    assert_eq!(body["results"][0]["doc_id"], "doc_000001");
    assert_eq!(body["results"][0]["confidence"], 91);

    for handle in handles {
        handle.abort();
    }
}

#[tokio::test]
async fn missing_document_passes_through_as_a_uniform_404() {
    let (base, _, handles) = spawn_stack().await;
    let http = reqwest::Client::new();

    let response = http
        .get(format!("{}/api/docs/doc_999999", base))
        .send()
        .await
        .expect("document response");
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);

    let body: Value = response.json().await.expect("error json");
    assert_eq!(body["error"], DOCUMENT_NOT_FOUND_MESSAGE);
    assert_eq!(body["statusCode"], 404);

    for handle in handles {
        handle.abort();
    }
}

#[tokio::test]
async fn metadata_feeds_the_cascade_engine() {
    let (base, _, handles) = spawn_stack().await;
    let http = reqwest::Client::new();

    let metadata: assist_core::FilterMetadata = http
        .get(format!("{}/api/search/metadata", base))
        .send()
        .await
        .expect("metadata response")
        .json()
        .await
        .expect("metadata json");

    let hierarchy = metadata.hierarchy.expect("hierarchy present");
    let filters = SearchFilters::default();
    assert_eq!(available_at(Level::Location, &hierarchy, &filters), vec!["A", "B"]);
    assert_eq!(available_at(Level::Line, &hierarchy, &filters), vec!["L1", "L2"]);

    for handle in handles {
        handle.abort();
    }
}

#[tokio::test]
async fn out_of_range_feedback_rating_is_rejected_before_forwarding() {
    let (base, feedback_calls, handles) = spawn_stack().await;
    let http = reqwest::Client::new();

    let response = http
        .post(format!("{}/api/feedback", base))
        .json(&json!({"doc_id": "doc_000001", "rating": 6, "helpful": true}))
        .send()
        .await
        .expect("feedback response");
    assert_eq!(response.status().as_u16(), 422);

    let body: Value = response.json().await.expect("error json");
    assert_eq!(body["statusCode"], 422);
    assert_eq!(feedback_calls.load(Ordering::SeqCst), 0);

    let ok = http
        .post(format!("{}/api/feedback", base))
        .json(&json!({"doc_id": "doc_000001", "rating": 5, "helpful": true}))
        .send()
        .await
        .expect("feedback response");
    assert!(ok.status().is_success());
    assert_eq!(feedback_calls.load(Ordering::SeqCst), 1);

    for handle in handles {
        handle.abort();
    }
}

#[tokio::test]
async fn slow_backend_maps_to_the_timeout_sentinel() {
    let slow = Router::new().route(
        "/api/search",
        post(|| async {
            tokio::time::sleep(Duration::from_millis(500)).await;
            Json(json!({"results": [], "total": 0, "processingTime": 0}))
        }),
    );
    let (backend_base, backend_handle) = spawn(slow).await;

    let client = RagClient::new(ClientConfig {
        base_url: backend_base,
        timeout: Duration::from_millis(100),
    })
    .expect("build client");

    let error = client
        .search(SearchRequest { query: "motor".to_string(), filters: None, k: None })
        .await
        .expect_err("must time out");
    assert!(error.is_timeout());
    assert_eq!(error.error, TIMEOUT_MESSAGE);

    backend_handle.abort();
}

#[tokio::test]
async fn unreachable_backend_maps_to_the_network_sentinel_and_502() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe listener");
    let dead_base = format!("http://{}", listener.local_addr().expect("addr"));
    drop(listener);

    let client = RagClient::new(ClientConfig {
        base_url: dead_base,
        timeout: Duration::from_millis(500),
    })
    .expect("build client");

    let error = client
        .search(SearchRequest { query: "motor".to_string(), filters: None, k: None })
        .await
        .expect_err("must fail to connect");
    assert_eq!(error.status_code, STATUS_NO_RESPONSE);

    let (proxy_base, proxy_handle) = spawn(app_router(AppState { gateway: Arc::new(client) })).await;
    let response = reqwest::Client::new()
        .post(format!("{}/api/search", proxy_base))
        .json(&json!({"query": "motor"}))
        .send()
        .await
        .expect("proxy response");
    assert_eq!(response.status(), reqwest::StatusCode::BAD_GATEWAY);
    let body: Value = response.json().await.expect("error json");
    assert_eq!(body["statusCode"], 0);

    proxy_handle.abort();
}

#[tokio::test]
async fn health_reports_backend_reachability() {
    let (base, _, handles) = spawn_stack().await;

    let body: Value = reqwest::Client::new()
        .get(format!("{}/health", base))
        .send()
        .await
        .expect("health response")
        .json()
        .await
        .expect("health json");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["backend"], true);

    for handle in handles {
        handle.abort();
    }
}
