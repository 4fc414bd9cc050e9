pub mod health;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::interview::handlers::handle_interview_coach;
use crate::state::AppState;
use crate::writing::handlers::{handle_cover_letter, handle_rewrite};

/// OPTIONS on any route, preflight or not, is answered by the CORS layer
/// with an empty 200; handlers never see it.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/interview-coach", post(handle_interview_coach))
        .route("/api/v1/generate-cover-letter", post(handle_cover_letter))
        .route("/api/v1/rewrite-text", post(handle_rewrite))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
