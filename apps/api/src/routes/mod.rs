pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Recommendations API
        .route(
            "/api/v1/recommendations",
            post(handlers::handle_recommendations),
        )
        .route(
            "/api/v1/recommendations/compute",
            post(handlers::handle_compute),
        )
        .route("/api/v1/match", post(handlers::handle_match))
        .with_state(state)
}
