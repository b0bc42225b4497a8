pub mod analyze;
pub mod conditions;
pub mod error;
pub mod health;
pub mod response;
pub mod v1;

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::controller::AppState;

pub fn router(state: AppState) -> Router {
    let body_limit = state.cfg.server.max_body_bytes;

    Router::new()
        .route("/healthz", get(health::healthz))
        .nest("/api/v1", v1::router(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(body_limit)),
        )
}
