//! Integration tests for direct lesson generation over HTTP.
//!
//! These tests verify that the fallback generator:
//! - Sends the topic and API key to the generation endpoint
//! - Turns the model's JSON answer into script and code
//! - Gives up on a server that never answers, ending the run in ERROR

mod common;

use aura_core::backend::mock::ScriptedBackend;
use aura_core::backend::GeminiLessonGenerator;
use aura_core::engine::RunOutcome;
use aura_protocol::config_models::FallbackSettings;
use aura_protocol::log_models::LogKind;
use aura_protocol::project_models::RunMode;
use aura_protocol::stage_models::PipelineStage;
use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use common::*;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

async fn generator_at(router: Router, request_timeout_ms: u64) -> GeminiLessonGenerator {
    let addr = serve(router).await;
    let settings = FallbackSettings {
        base_url: format!("http://{addr}/v1beta"),
        request_timeout_ms,
        ..FallbackSettings::default()
    };
    GeminiLessonGenerator::new(&settings, Some("test-key".to_string())).expect("client builds")
}

async fn generate_content(
    Path(call): Path<String>,
    headers: HeaderMap,
    Json(request): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if call != "gemini-2.5-flash:generateContent" {
        return (StatusCode::NOT_FOUND, Json(json!({ "error": call })));
    }
    if headers.get("x-goog-api-key").and_then(|key| key.to_str().ok()) != Some("test-key") {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "error": "bad key" })));
    }

    let prompt = request["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap_or_default();
    let lesson = json!({
        "title": "Derivatives",
        "script": {
            "intro": format!("Today: {prompt}"),
            "explanation": "Slopes of tangent lines.",
            "conclusion": "Practice makes perfect."
        },
        "manimCode": "class MathLessonScene(Scene): pass"
    });
    (
        StatusCode::OK,
        Json(json!({
            "candidates": [{ "content": { "parts": [{ "text": lesson.to_string() }] } }]
        })),
    )
}

fn lesson_api() -> Router {
    Router::new().route("/v1beta/models/:call", post(generate_content))
}

/// Accepts every request and never answers it.
fn silent_api() -> Router {
    Router::new().fallback(|| async { std::future::pending::<StatusCode>().await })
}

#[tokio::test]
async fn test_fallback_generates_lesson_over_http() {
    let engine = create_orchestrator(
        RunMode::Live,
        Arc::new(ScriptedBackend::unreachable()),
        Arc::new(generator_at(lesson_api(), 5_000).await),
        fast_settings(),
    );

    engine.store().set_topic("Derivatives");
    let outcome = engine.run_pipeline().await;

    let project = engine.store().project();
    assert_eq!(outcome, Some(RunOutcome::CompletedWithFallback));
    assert_eq!(project.status, PipelineStage::Completed);
    assert_eq!(
        project.generated_code.as_deref(),
        Some("class MathLessonScene(Scene): pass")
    );
    let script = project.script.expect("fallback script");
    assert!(script.intro.contains("Derivatives"));
    assert!(project.video_url.is_none());
}

#[tokio::test]
async fn test_silent_generation_api_times_out() {
    let engine = create_orchestrator(
        RunMode::Live,
        Arc::new(ScriptedBackend::unreachable()),
        Arc::new(generator_at(silent_api(), 200).await),
        fast_settings(),
    );
    let mut rx = engine.store().subscribe();

    engine.store().set_topic("Derivatives");
    let outcome = tokio::time::timeout(Duration::from_secs(10), engine.run_pipeline())
        .await
        .expect("run ends once the generation request times out");

    let snapshot = engine.store().snapshot();
    assert_eq!(outcome, Some(RunOutcome::Failed));
    assert_eq!(snapshot.project.status, PipelineStage::Error);
    assert!(has_log_containing(&snapshot.logs, LogKind::Error, "Fallback failed"));
    assert!(!snapshot.is_processing);

    let events = drain_events(&mut rx);
    assert_run_properties(&events);
    assert_eq!(error_transitions(&events), 1);
}
