use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::{handlers, state::ApiState};

pub fn create_router(state: ApiState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health::health_check))

        // Contributor aggregation
        .route("/api/contributors", get(handlers::contributors::list_contributors))
        .route(
            "/api/contributors/:username/issues",
            get(handlers::contributors::user_issues),
        )
        .route(
            "/api/contributors/:username/pulls",
            get(handlers::contributors::user_pull_requests),
        )

        // Add state
        .with_state(state)

        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
