//! HTTP surface tests: drive the axum router in-process with `oneshot`.

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use countdown_api::{HttpApi, RegistryAdapter};
use countdown_core::TimerRegistry;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn app() -> Router {
    let adapter = RegistryAdapter::new(TimerRegistry::new());
    HttpApi::new(Arc::new(adapter)).router()
}

async fn send(app: &Router, req: Request<Body>) -> Result<(StatusCode, Value), Box<dyn std::error::Error>> {
    let response = app.clone().oneshot(req).await?;
    let status = response.status();
    let bytes = response.into_body().collect().await?.to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, json))
}

fn post_json(uri: &str, body: Value) -> Result<Request<Body>, axum::http::Error> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
}

fn post(uri: &str) -> Result<Request<Body>, axum::http::Error> {
    Request::builder().method("POST").uri(uri).body(Body::empty())
}

fn get(uri: &str) -> Result<Request<Body>, axum::http::Error> {
    Request::builder().uri(uri).body(Body::empty())
}

async fn create(app: &Router, body: Value) -> Result<String, Box<dyn std::error::Error>> {
    let (status, json) = send(app, post_json("/api/v1/timers", body)?).await?;
    assert_eq!(status, StatusCode::CREATED);
    let id = json["id"].as_str().ok_or("id should be a string")?;
    Ok(id.to_string())
}

#[tokio::test(start_paused = true)]
async fn create_starts_timer_by_default() -> TestResult {
    let app = app();
    let (status, json) = send(&app, post_json("/api/v1/timers", json!({ "minutes": 5 }))?).await?;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["status"], "running");
    assert_eq!(json["remaining_seconds"], 300);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn create_rejects_non_positive_minutes() -> TestResult {
    let app = app();

    let (status, json) = send(&app, post_json("/api/v1/timers", json!({ "minutes": 0 }))?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().is_some_and(|e| e.contains("minutes")));

    let (status, _) = send(&app, post_json("/api/v1/timers", json!({ "minutes": -2.5 }))?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, post_json("/api/v1/timers", json!({ "mins": 1 }))?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn short_timer_finishes() -> TestResult {
    let app = app();
    let id = create(&app, json!({ "minutes": 0.02 })).await?;

    tokio::time::sleep(Duration::from_secs(2)).await;

    let (status, json) = send(&app, get(&format!("/api/v1/timers/{id}"))?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], id.as_str());
    assert_eq!(json["status"], "finished");
    assert_eq!(json["remaining_seconds"], 0);
    assert_eq!(json["duration_seconds"], 1);
    assert!(json["finished_at"].is_number());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn cancel_then_query_reports_cancelled() -> TestResult {
    let app = app();
    let id = create(&app, json!({ "minutes": 5 })).await?;

    let (status, json) = send(&app, post(&format!("/api/v1/timers/{id}/cancel"))?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["cancelled"], true);

    tokio::time::sleep(Duration::from_millis(1_500)).await;
    let (_, json) = send(&app, get(&format!("/api/v1/timers/{id}"))?).await?;
    assert_eq!(json["status"], "cancelled");
    assert_eq!(json["cancel_requested"], true);

    // Cancelling again is still a success.
    let (status, _) = send(&app, post(&format!("/api/v1/timers/{id}/cancel"))?).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn explicit_start_and_double_start() -> TestResult {
    let app = app();
    let id = create(&app, json!({ "minutes": 1, "autostart": false })).await?;

    let (_, json) = send(&app, get(&format!("/api/v1/timers/{id}"))?).await?;
    assert_eq!(json["status"], "created");

    let (status, json) = send(&app, post(&format!("/api/v1/timers/{id}/start"))?).await?;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(json["status"], "running");

    let (status, _) = send(&app, post(&format!("/api/v1/timers/{id}/start"))?).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn unknown_id_is_404_everywhere() -> TestResult {
    let app = app();

    let (status, json) = send(&app, get("/api/v1/timers/does-not-exist")?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].is_string());

    let (status, _) = send(&app, post("/api/v1/timers/does-not-exist/cancel")?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, post("/api/v1/timers/does-not-exist/start")?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn list_filters_by_status() -> TestResult {
    let app = app();
    create(&app, json!({ "minutes": 1 })).await?;
    create(&app, json!({ "minutes": 1 })).await?;
    create(&app, json!({ "minutes": 1, "autostart": false })).await?;

    let (status, json) = send(&app, get("/api/v1/timers?status=running")?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 2);

    let (_, json) = send(&app, get("/api/v1/timers?limit=1&offset=1")?).await?;
    assert_eq!(json["total"], 3);
    assert_eq!(json["timers"].as_array().map(Vec::len), Some(1));

    let (status, _) = send(&app, get("/api/v1/timers?status=paused")?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn malformed_list_params_get_json_error() -> TestResult {
    let app = app();

    let (status, json) = send(&app, get("/api/v1/timers?limit=abc")?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().is_some_and(|e| e.contains("limit")));

    let (status, json) = send(&app, get("/api/v1/timers?offset=-1")?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn create_after_shutdown_is_503_and_registers_nothing() -> TestResult {
    let registry = TimerRegistry::new();
    let app = HttpApi::new(Arc::new(RegistryAdapter::new(registry.clone()))).router();
    registry.shutdown();

    let (status, json) = send(&app, post_json("/api/v1/timers", json!({ "minutes": 5 }))?).await?;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(json["error"].is_string());
    assert!(registry.is_empty());
    Ok(())
}
