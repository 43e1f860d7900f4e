use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use contribhub_core::{AggregateRecord, Error, SearchItem};
use serde::{Deserialize, Serialize};

use crate::state::ApiState;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IssuesResponse {
    pub issues: Vec<SearchItem>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PullRequestsResponse {
    #[serde(rename = "pullRequests")]
    pub pull_requests: Vec<SearchItem>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error_response(status: StatusCode, message: &str) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

fn server_error(message: &str) -> ApiError {
    error_response(StatusCode::INTERNAL_SERVER_ERROR, message)
}

fn invalid_username(username: &str) -> ApiError {
    tracing::warn!("Rejected malformed username {:?}", username);
    error_response(StatusCode::BAD_REQUEST, "Invalid GitHub username")
}

/// Aggregate every contributor of the configured organization
pub async fn list_contributors(
    State(state): State<ApiState>,
) -> Result<Json<Vec<AggregateRecord>>, ApiError> {
    let org = state.engine.organization().to_string();

    match state.engine.aggregate(&org).await {
        Ok(records) => Ok(Json(records)),
        Err(Error::RepositoriesUnavailable(e)) => {
            tracing::error!("Aggregation for {} failed: {}", org, e);
            Err(server_error("Failed to fetch repositories"))
        }
        Err(e) => {
            tracing::error!("Aggregation for {} failed: {}", org, e);
            Err(server_error("Failed to fetch organization info"))
        }
    }
}

pub async fn user_issues(
    State(state): State<ApiState>,
    Path(username): Path<String>,
) -> Result<Json<IssuesResponse>, ApiError> {
    match state.engine.fetch_issues_for(&username).await {
        Ok(issues) => Ok(Json(IssuesResponse { issues })),
        Err(Error::InvalidLogin(_)) => Err(invalid_username(&username)),
        Err(e) => {
            tracing::error!("Failed to fetch issues for {}: {}", username, e);
            Err(server_error("Failed to fetch user-created issues"))
        }
    }
}

pub async fn user_pull_requests(
    State(state): State<ApiState>,
    Path(username): Path<String>,
) -> Result<Json<PullRequestsResponse>, ApiError> {
    match state.engine.fetch_pull_requests_for(&username).await {
        Ok(pull_requests) => Ok(Json(PullRequestsResponse { pull_requests })),
        Err(Error::InvalidLogin(_)) => Err(invalid_username(&username)),
        Err(e) => {
            tracing::error!("Failed to fetch pull requests for {}: {}", username, e);
            Err(server_error("Failed to fetch user-created pull requests"))
        }
    }
}
