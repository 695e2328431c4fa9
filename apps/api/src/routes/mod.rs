pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route("/api/v1/ai/improve", post(handlers::handle_improve))
        .route("/api/v1/ai/context", post(handlers::handle_detect_context))
        .with_state(state)
}
