use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::classifier::ClassifierMode;
use crate::controller::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    timestamp: chrono::DateTime<chrono::Utc>,
    classifier: ClassifierHealth,
}

#[derive(Debug, Serialize)]
pub struct ClassifierHealth {
    mode: ClassifierMode,
    backend: &'static str,
    timeout_seconds: u64,
}

pub async fn healthz() -> impl IntoResponse {
    StatusCode::OK
}

/// GET /api/v1/health - Service status and the configured classifier
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now(),
        classifier: ClassifierHealth {
            mode: state.cfg.classifier.mode,
            backend: state.advisor.classifier_name(),
            timeout_seconds: state.cfg.classifier.timeout().as_secs(),
        },
    };

    (StatusCode::OK, Json(response))
}
