pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/content-types",
            get(handlers::handle_content_types),
        )
        .route("/api/v1/generate", post(handlers::handle_generate))
        .route(
            "/api/v1/figma-block/parse",
            post(handlers::handle_parse_block),
        )
        .with_state(state)
}
