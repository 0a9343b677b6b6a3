use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

use crate::catalog::{self, Configuration};
use crate::constants::server::INVALID_CONFIGS_MESSAGE;
use crate::server::AppState;
use crate::simulator::RunResult;

/// Errors surfaced to HTTP clients as `{"error": "..."}`
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct ConfigurationsResponse {
    pub configurations: &'static [Configuration],
}

pub async fn list_configurations() -> Json<ConfigurationsResponse> {
    Json(ConfigurationsResponse {
        configurations: catalog::all(),
    })
}

/// Pull a non-empty list of string ids out of `{"configs": [...]}`
pub fn parse_configs(body: &[u8]) -> Result<Vec<String>, ApiError> {
    let invalid = || ApiError::BadRequest(INVALID_CONFIGS_MESSAGE.to_string());

    let value: Value = serde_json::from_slice(body).map_err(|_| invalid())?;
    let configs = value
        .get("configs")
        .and_then(Value::as_array)
        .filter(|configs| !configs.is_empty())
        .ok_or_else(invalid)?;

    configs
        .iter()
        .map(|id| id.as_str().map(str::to_string).ok_or_else(invalid))
        .collect()
}

pub async fn run_benchmarks(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<RunResult>, ApiError> {
    let ids = parse_configs(&body)?;
    log::info!("Running benchmarks for {} configuration(s)", ids.len());

    // A panic inside the run becomes a 500 instead of a dropped connection
    let simulator = Arc::clone(&state.simulator);
    let result = tokio::spawn(async move { simulator.run_many(&ids).await })
        .await
        .map_err(|e| {
            log::error!("Benchmark run failed: {}", e);
            ApiError::Internal(e.to_string())
        })?;

    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_configs() {
        assert_eq!(
            parse_configs(br#"{"configs":["js_inline","wasm_max"]}"#).unwrap(),
            vec!["js_inline".to_string(), "wasm_max".to_string()]
        );
    }

    #[test]
    fn test_parse_configs_rejects_bad_shapes() {
        let bodies: [&[u8]; 6] = [
            b"",
            b"not json",
            br#"{}"#,
            br#"{"configs":[]}"#,
            br#"{"configs":"js_inline"}"#,
            br#"{"configs":["js_inline",3]}"#,
        ];

        for body in bodies {
            match parse_configs(body) {
                Err(ApiError::BadRequest(message)) => assert_eq!(message, INVALID_CONFIGS_MESSAGE),
                other => panic!("expected BadRequest for {:?}, got {:?}", body, other),
            }
        }
    }

    #[test]
    fn test_error_status() {
        assert_eq!(
            ApiError::BadRequest("x".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Internal("x".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
