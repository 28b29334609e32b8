use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, State};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::Mutex;

use mint_telegraph::telegraph::request::ViewsScope;
use mint_telegraph::telegraph::{HttpTransport, Telegraph, Transport, TransportError};

type Received = Arc<Mutex<Vec<(String, Value)>>>;

/// Envelope the stub answers with for each method.
fn reply(method: &str) -> Value {
    match method {
        "getViews" => json!({"ok": true, "result": {"views": 42}}),
        "getPage" => json!({"ok": false, "error": "PAGE_NOT_FOUND"}),
        _ => json!({"ok": true}),
    }
}

async fn handle(
    State(received): State<Received>,
    Path(method): Path<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let response = reply(&method);
    received.lock().await.push((method, body));
    Json(response)
}

/// Serves a fake Telegraph API on a free local port, returns its base URL.
async fn spawn_stub() -> (String, Received) {
    let received: Received = Arc::new(Mutex::new(vec![]));
    let app = Router::new()
        .route("/:method", post(handle))
        .with_state(received.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), received)
}

#[tokio::test]
async fn test_invoke_posts_json_to_method_url() {
    let (base, received) = spawn_stub().await;
    let transport = HttpTransport::new(format!("{}/", base), Duration::from_secs(5)).unwrap();

    let result = transport
        .invoke("getViews", json!({"path": "Sample", "year": 2026}))
        .await
        .unwrap();
    assert_eq!(result, json!({"views": 42}));

    let received = received.lock().await.clone();
    assert_eq!(received, vec![
        ("getViews".to_string(), json!({"path": "Sample", "year": 2026})),
    ]);
}

#[tokio::test]
async fn test_invoke_maps_envelope_errors() {
    let (base, _) = spawn_stub().await;
    let transport = HttpTransport::new(base, Duration::from_secs(5)).unwrap();

    let err = transport.invoke("getPage", json!({"path": "Missing"})).await.unwrap_err();
    assert!(matches!(err, TransportError::Api(ref msg) if msg == "PAGE_NOT_FOUND"));

    let err = transport.invoke("createAccount", json!({"short_name": "x"})).await.unwrap_err();
    assert!(matches!(err, TransportError::EmptyResult));
}

#[tokio::test]
async fn test_client_over_http() {
    let (base, received) = spawn_stub().await;
    let telegraph = Telegraph::new(HttpTransport::new(base, Duration::from_secs(5)).unwrap());

    let views = telegraph.get_views("Sample", ViewsScope::Hour(2026, 10, 16, 9)).await.unwrap();
    assert_eq!(views.views, 42);

    let received = received.lock().await.clone();
    assert_eq!(received[0].1, json!({"path": "Sample", "year": 2026, "month": 10, "day": 16, "hour": 9}));
}

#[tokio::test]
async fn test_unreachable_server_is_http_error() {
    // Bind then drop to get a port nothing listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let transport = HttpTransport::new(format!("http://{}", addr), Duration::from_secs(5)).unwrap();
    let err = transport.invoke("getViews", json!({"path": "x"})).await.unwrap_err();
    assert!(matches!(err, TransportError::Http(_)));
}
