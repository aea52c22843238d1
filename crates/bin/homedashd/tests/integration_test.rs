//! End-to-end smoke tests for the full homedashd stack.
//!
//! Each test wires the simulated backend, the dashboard and the real axum
//! router together and exercises the HTTP layer via
//! `tower::ServiceExt::oneshot`; no TCP port is bound.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use homedash_adapter_http_axum::router;
use homedash_adapter_http_axum::state::AppState;
use homedash_adapter_simulated::{MockDeviceSource, SimulatedExecutor};
use homedash_app::render_bus::RenderBus;
use homedash_app::services::dashboard::Dashboard;
use homedash_app::toast_tray::ToastTray;
use serde_json::{Value, json};
use tower::ServiceExt;

/// Build a fully-wired router over the demo household.
///
/// The executor answers instantly and rejects with `failure_rate`.
async fn app_with(failure_rate: f64, fail_load: bool) -> axum::Router {
    let toasts = Arc::new(ToastTray::new(Duration::from_secs(60), 64));
    let renders = Arc::new(RenderBus::new(64));
    let dashboard = Arc::new(Dashboard::new(
        SimulatedExecutor::new(Duration::ZERO..Duration::ZERO, failure_rate),
        Arc::clone(&toasts),
        Arc::clone(&renders),
    ));

    let source = MockDeviceSource::new(Duration::ZERO).failing(fail_load);
    let _ = dashboard.load(&source).await;

    router::build(AppState::new(dashboard, toasts, renders))
}

async fn app() -> axum::Router {
    app_with(0.0, false).await
}

async fn send(
    app: &axum::Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    let resp = app()
        .await
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_serve_demo_household_when_loaded() {
    let app = app().await;

    let (status, body) = send(&app, Method::GET, "/api/dashboard", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["load_state"], "ready");
    assert_eq!(body["lights"].as_array().unwrap().len(), 4);
    assert_eq!(body["thermostats"].as_array().unwrap().len(), 2);
    assert_eq!(body["cameras"].as_array().unwrap().len(), 3);
    assert_eq!(body["security"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn should_narrow_dashboard_when_room_selected() {
    let app = app().await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/view/room",
        Some(json!({"room": "bedroom"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view"]["room_label"], "Bedroom");
    assert_eq!(body["view"]["lights"][0]["id"], "light-3");
    assert_eq!(body["view"]["thermostats"][0]["id"], "therm-2");
    assert!(body["view"]["cameras"].as_array().unwrap().is_empty());
    assert_eq!(body["view"]["security"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn should_report_failed_load_and_refuse_commands() {
    let app = app_with(0.0, true).await;

    let (status, body) = send(&app, Method::GET, "/api/dashboard", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["load_state"], "failed");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/devices/light-1/power",
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (_, toasts) = send(&app, Method::GET, "/api/notifications", None).await;
    assert_eq!(
        toasts[0]["message"],
        "Failed to load your devices. Please try again."
    );
}

// ---------------------------------------------------------------------------
// Device commands
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_commit_toggle_and_notify() {
    let app = app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/devices/light-2/power",
        Some(json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "committed");
    assert_eq!(body["device"]["state"], true);

    let (_, toasts) = send(&app, Method::GET, "/api/notifications", None).await;
    assert_eq!(toasts[0]["title"], "Device Updated");
    assert_eq!(toasts[0]["message"], "Kitchen turned on");
}

#[tokio::test]
async fn should_roll_back_when_backend_rejects_everything() {
    let app = app_with(1.0, false).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/devices/therm-1/mode",
        Some(json!({"mode": "cool"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "rolled_back");
    assert_eq!(body["device"]["mode"], "heat");

    let (_, toasts) = send(&app, Method::GET, "/api/notifications", None).await;
    assert_eq!(toasts[0]["kind"], "error");
    assert_eq!(
        toasts[0]["message"],
        "Failed to update mode. Please try again."
    );
}

#[tokio::test]
async fn should_return_not_found_for_unknown_device() {
    let app = app().await;

    let (status, _) = send(&app, Method::GET, "/api/devices/nope", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_apply_brightness_immediately() {
    let app = app().await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/devices/light-1/brightness",
        Some(json!({"value": 35})),
    )
    .await;

    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["brightness"], 35);

    let (_, device) = send(&app, Method::GET, "/api/devices/light-1", None).await;
    assert_eq!(device["brightness"], 35);
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_dismiss_notification() {
    let app = app().await;
    send(
        &app,
        Method::POST,
        "/api/devices/cam-1/camera",
        Some(json!({"action": "snapshot"})),
    )
    .await;

    let (_, toasts) = send(&app, Method::GET, "/api/notifications", None).await;
    assert_eq!(toasts[0]["title"], "Snapshot Taken");
    let id = toasts[0]["id"].as_u64().unwrap();

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/notifications/{id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, toasts) = send(&app, Method::GET, "/api/notifications", None).await;
    assert!(toasts.as_array().unwrap().is_empty());
}
