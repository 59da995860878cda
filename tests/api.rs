//! HTTP surface tests, driving the router in-process.

use std::sync::Arc;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use focused_brew::{
    api::create_router,
    state::AppState,
    timer::{ClockSettings, Settings, TimerEngine, TimerMode},
};

fn app(mode: TimerMode, settings: Settings) -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(
        20554,
        "127.0.0.1".to_string(),
        TimerEngine::new(mode, settings),
    ));
    (create_router(Arc::clone(&state)), state)
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test(start_paused = true)]
async fn health_reports_ok() {
    let (app, _) = app(TimerMode::Default, Settings::default());
    let (status, body) = call(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test(start_paused = true)]
async fn start_without_duration_stays_idle() {
    let (app, _) = app(TimerMode::Default, Settings::default());
    let (status, body) = call(&app, Method::POST, "/start", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "idle");
    assert_eq!(body["timer"]["display"], "00:00:00");
}

#[tokio::test(start_paused = true)]
async fn default_mode_command_flow() {
    let settings = Settings {
        clock: ClockSettings::new(0, 25),
        ..Settings::default()
    };
    let (app, state) = app(TimerMode::Default, settings);

    let (_, body) = call(&app, Method::POST, "/start", None).await;
    assert_eq!(body["status"], "running");
    assert_eq!(body["timer"]["total_seconds"], 1500);
    assert_eq!(body["timer"]["remaining_seconds"], 1500);
    assert_eq!(body["timer"]["display"], "00:25:00");

    let (_, body) = call(&app, Method::POST, "/pause", None).await;
    assert_eq!(body["status"], "paused");

    let (_, body) = call(&app, Method::POST, "/reset", None).await;
    assert_eq!(body["status"], "idle");
    assert_eq!(body["timer"]["total_seconds"], 0);
    assert_eq!(body["timer"]["minutes"], 25);

    let (status, body) = call(&app, Method::GET, "/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["last_action"], "reset");
    assert_eq!(body["port"], 20554);
    assert_eq!(state.get_last_action().0.as_deref(), Some("reset"));
}

#[tokio::test(start_paused = true)]
async fn draft_is_clamped_and_applied() {
    let (app, _) = app(TimerMode::Default, Settings::default());

    let (status, body) = call(
        &app,
        Method::PUT,
        "/draft",
        Some(json!({ "field": "hours", "value": 99 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["draft"], json!({ "mode": "default", "hours": 23, "minutes": 0 }));

    call(&app, Method::PUT, "/draft", Some(json!({ "field": "minutes", "value": "30" }))).await;

    // nothing is committed until apply
    let (_, body) = call(&app, Method::GET, "/status", None).await;
    assert_eq!(body["timer"]["hours"], 0);

    let (_, body) = call(&app, Method::POST, "/apply", None).await;
    assert_eq!(body["timer"]["hours"], 23);
    assert_eq!(body["timer"]["minutes"], 30);
    assert_eq!(body["timer"]["total_seconds"], 23 * 3600 + 30 * 60);
    assert_eq!(body["status"], "paused");
}

#[tokio::test(start_paused = true)]
async fn cancelled_draft_is_discarded() {
    let (app, _) = app(TimerMode::Default, Settings::default());
    call(&app, Method::PUT, "/draft", Some(json!({ "field": "minutes", "value": 10 }))).await;

    let (status, body) = call(&app, Method::DELETE, "/draft", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["draft"]["minutes"], 0);
}

#[tokio::test(start_paused = true)]
async fn unknown_draft_field_is_rejected() {
    let (app, _) = app(TimerMode::Default, Settings::default());
    let (status, _) = call(
        &app,
        Method::PUT,
        "/draft",
        Some(json!({ "field": "seconds", "value": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test(start_paused = true)]
async fn pomodoro_apply_starts_first_work_session() {
    let (app, _) = app(TimerMode::Default, Settings::default());

    let (_, body) = call(&app, Method::PUT, "/mode", Some(json!({ "mode": "pomodoro" }))).await;
    assert_eq!(body["timer"]["mode"], "pomodoro");
    assert_eq!(body["status"], "idle");

    let (_, body) = call(&app, Method::GET, "/draft", None).await;
    assert_eq!(body["draft"]["mode"], "pomodoro");
    assert_eq!(body["draft"]["work_minutes"], 25);

    call(
        &app,
        Method::PUT,
        "/draft",
        Some(json!({ "field": "workMinutes", "value": 50 })),
    )
    .await;
    call(
        &app,
        Method::PUT,
        "/draft",
        Some(json!({ "field": "sessions_before_long_break", "value": 0 })),
    )
    .await;

    let (_, body) = call(&app, Method::GET, "/draft", None).await;
    assert_eq!(body["draft"]["sessions_before_long_break"], 2);

    let (_, body) = call(&app, Method::POST, "/apply", None).await;
    assert_eq!(body["status"], "running");
    assert_eq!(body["timer"]["pomodoro_session"], "work");
    assert_eq!(body["timer"]["session_count"], 1);
    assert_eq!(body["timer"]["total_seconds"], 3000);
}

#[tokio::test(start_paused = true)]
async fn unknown_mode_is_rejected() {
    let (app, _) = app(TimerMode::Default, Settings::default());
    let (status, _) = call(&app, Method::PUT, "/mode", Some(json!({ "mode": "turbo" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}
