//! HTTP contract of the simulator server: configuration listing, run
//! validation, result shape and ordering, CORS.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use benching_machine::server::{create_router, AppState};
use benching_machine::ScoreSimulator;

const INVALID: &str = r#"Please provide configs: ["id1","id2"]"#;

fn app() -> Router {
    create_router(AppState::new(ScoreSimulator::with_seed(42).with_latency(false)))
}

fn run_request(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/run")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_list_configurations() {
    let response = app()
        .oneshot(Request::get("/api/configurations").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let configurations = body["configurations"].as_array().unwrap();
    assert_eq!(configurations.len(), 23);
    assert_eq!(configurations[0]["id"], "js_inline");
    for config in configurations {
        for key in ["id", "name", "desc", "color"] {
            assert!(config[key].is_string(), "{} missing {}", config, key);
        }
    }
}

#[tokio::test]
async fn test_run_rejects_invalid_bodies() {
    let bodies = [
        json!({}).to_string(),
        json!({ "configs": [] }).to_string(),
        json!({ "configs": "js_inline" }).to_string(),
        json!({ "configs": [1, 2] }).to_string(),
        "not json".to_string(),
    ];

    for body in bodies {
        let response = app().oneshot(run_request(body.clone())).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {}", body);
        assert_eq!(json_body(response).await, json!({ "error": INVALID }));
    }
}

#[tokio::test]
async fn test_run_single_configuration() {
    let body = json!({ "configs": ["js_inline"] }).to_string();
    let response = app().oneshot(run_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));

    let configurations = body["configurations"].as_array().unwrap();
    assert_eq!(configurations.len(), 1);

    let config = &configurations[0];
    assert_eq!(config["id"], "js_inline");
    assert_eq!(config["name"], "Inline Script (HTML)");

    let tests = config["tests"].as_array().unwrap();
    assert_eq!(tests.len(), 7);
    assert_eq!(tests[0]["name"], "Fibonacci (Recursive)");
    assert_eq!(tests[6]["name"], "Startup/Load Efficiency");

    let fib = tests[0]["opsPerSec"].as_f64().unwrap();
    assert!((120_000.0..=140_000.0).contains(&fib), "{}", fib);
    assert_eq!(tests[0]["stats"]["margin"], 2.0);
    assert!(tests[0].get("error").is_none());
}

#[tokio::test]
async fn test_run_preserves_order_and_accepts_unknown_ids() {
    let ids = ["wasm_max", "made_up", "js_inline", "wasm_max"];
    let body = json!({ "configs": ids }).to_string();
    let response = app().oneshot(run_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let returned: Vec<&str> = body["configurations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    assert_eq!(returned, ids);

    let unknown = &body["configurations"][1];
    assert_eq!(unknown["name"], "made_up");
    assert_eq!(unknown["tests"].as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn test_gpu_configuration_scores() {
    let body = json!({ "configs": ["webgpu_compute"] }).to_string();
    let response = app().oneshot(run_request(body)).await.unwrap();
    let body = json_body(response).await;
    let tests = body["configurations"][0]["tests"].as_array().unwrap();

    // Recursion cannot run on the GPU; matrix work is where it shines
    let fib = tests[0]["opsPerSec"].as_f64().unwrap();
    let matrix = tests[2]["opsPerSec"].as_f64().unwrap();
    assert!(fib < 120_000.0, "{}", fib);
    assert!(matrix > 45_000.0 * 10.0, "{}", matrix);
}

#[tokio::test]
async fn test_cors_is_permissive() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/run")
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "POST")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert!(response.status().is_success());
    assert!(response.headers().get("access-control-allow-origin").is_some());
}

#[tokio::test(start_paused = true)]
async fn test_run_waits_for_each_configuration() {
    let app = create_router(AppState::new(ScoreSimulator::with_seed(1)));
    let start = tokio::time::Instant::now();

    let body = json!({ "configs": ["js_inline", "utf16_html"] }).to_string();
    let response = app.oneshot(run_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // 800 ms floor for js_inline plus 900 ms for utf16_html
    assert!(start.elapsed() >= std::time::Duration::from_millis(1_700));
}
