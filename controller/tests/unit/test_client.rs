//! reqwest client against a local fake Marathon

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use marathonctl::errors::ControllerError;
use marathonctl::http::client::{MarathonClient, Orchestrator};

/// Bodies received by the fake on `PUT /v2/apps/{id}`
pub type Received = Arc<Mutex<Vec<(String, Value)>>>;

async fn get_app(Path(id): Path<String>) -> (StatusCode, Json<Value>) {
    if id == "web" {
        (
            StatusCode::OK,
            Json(json!({ "app": {
                "id": "/web",
                "instances": 2,
                "tasksRunning": 2,
                "tasksHealthy": 2,
                "tasksUnhealthy": 0,
                "tasksStaged": 0,
            }})),
        )
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": format!("App '/{}' does not exist", id) })),
        )
    }
}

async fn put_app(
    State(received): State<Received>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    received.lock().unwrap().push((id.clone(), body.clone()));

    if id == "locked" {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "message": "App is locked by one or more deployments." })),
        );
    }

    (
        StatusCode::CREATED,
        Json(json!({
            "deploymentId": uuid::Uuid::new_v4().to_string(),
            "version": "2026-10-16T08:00:00.000Z",
        })),
    )
}

async fn get_versions() -> Json<Value> {
    Json(json!({ "versions": ["v3", "v2", "v1"] }))
}

async fn bad_gateway() -> (StatusCode, &'static str) {
    (StatusCode::BAD_GATEWAY, "<html>Bad Gateway</html>")
}

/// Start a fake Marathon on an ephemeral port, returning its base URL
pub async fn spawn_fake_marathon() -> (String, Received) {
    let received: Received = Arc::default();

    let app = Router::new()
        .route("/v2/apps/{id}", get(get_app).put(put_app))
        .route("/v2/apps/{id}/versions", get(get_versions))
        .route("/gateway", get(bad_gateway))
        .with_state(received.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), received)
}

fn client() -> MarathonClient {
    MarathonClient::new(Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_get_app() {
    let (base, _) = spawn_fake_marathon().await;

    let reply = client().get(&format!("{}/v2/apps/web", base)).await.unwrap();
    assert_eq!(reply.status, 200);
    assert_eq!(reply.body["app"]["tasksRunning"], 2);
}

#[tokio::test]
async fn test_non_2xx_is_a_reply() {
    let (base, _) = spawn_fake_marathon().await;

    let reply = client().get(&format!("{}/v2/apps/missing", base)).await.unwrap();
    assert_eq!(reply.status, 404);
    assert!(!reply.is_success());
    assert_eq!(reply.body["message"], "App '/missing' does not exist");
}

#[tokio::test]
async fn test_put_sends_json() {
    let (base, received) = spawn_fake_marathon().await;

    let reply = client()
        .put(&format!("{}/v2/apps/web", base), &json!({ "instances": 3 }))
        .await
        .unwrap();
    assert_eq!(reply.status, 201);
    assert!(reply.body["deploymentId"].is_string());

    let received = received.lock().unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0], ("web".to_string(), json!({ "instances": 3 })));
}

#[tokio::test]
async fn test_versions() {
    let (base, _) = spawn_fake_marathon().await;

    let reply = client()
        .get(&format!("{}/v2/apps/web/versions", base))
        .await
        .unwrap();
    assert_eq!(reply.body["versions"][1], "v2");
}

#[tokio::test]
async fn test_plain_text_body() {
    let (base, _) = spawn_fake_marathon().await;

    let reply = client().get(&format!("{}/gateway", base)).await.unwrap();
    assert_eq!(reply.status, 502);
    assert_eq!(reply.body, json!("<html>Bad Gateway</html>"));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client()
        .get(&format!("http://{}/v2/apps/web", addr))
        .await
        .unwrap_err();
    assert!(matches!(err, ControllerError::HttpError(_)));
}
