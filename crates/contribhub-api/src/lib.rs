use anyhow::Result;
use contribhub_core::AggregationEngine;
use contribhub_github::GitHubClient;
use std::sync::Arc;

pub mod handlers;
pub mod routes;
pub mod settings;
pub mod state;

pub use routes::create_router;
pub use settings::Settings;
pub use state::ApiState;

/// Build an aggregation engine backed by the GitHub REST API
pub fn build_engine(settings: &Settings) -> Result<AggregationEngine> {
    let client = GitHubClient::with_config(settings.client_config())?;
    Ok(AggregationEngine::new(Arc::new(client), settings.engine_config()))
}

/// Serve the HTTP API until the listener fails
pub async fn serve(settings: Settings) -> Result<()> {
    let engine = Arc::new(build_engine(&settings)?);
    let app = create_router(ApiState::new(engine));

    let addr = format!("0.0.0.0:{}", settings.port);
    tracing::info!(
        "🚀 ContribHub API Server running on http://{} (organization: {})",
        addr,
        settings.github_org
    );

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
