use axum::{
    routing::{get, post},
    Router,
};

use crate::controller::AppState;

use super::{analyze, conditions, health};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/analyze", post(analyze::analyze_panel))
        .route("/conditions", get(conditions::list_conditions))
        .route("/health", get(health::health_check))
        .with_state(state)
}
