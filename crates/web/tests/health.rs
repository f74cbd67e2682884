//! Health endpoint integration tests.

mod common;

use axum::http::StatusCode;
use common::{app_with_stub, body_string, get_page};
use serde_json::Value;

#[tokio::test]
async fn health_reports_backend_reachable() {
    let (app, _stub) = app_with_stub().await;

    let response = get_page(app, "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = serde_json::from_str(&body_string(response).await).expect("json body");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["backend_healthy"], true);
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn health_reports_backend_down_without_failing() {
    // Point the app at a port nothing is listening on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    let app = common::build_test_app(&format!("http://{addr}"));

    let response = get_page(app, "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = serde_json::from_str(&body_string(response).await).expect("json body");
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["backend_healthy"], false);
}
