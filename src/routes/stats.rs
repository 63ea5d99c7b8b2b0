use axum::{Json, Router, extract::State, routing::post};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::error::{AppError, Result};
use crate::models::{AuthorAggregate, RepoDescriptor};

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/repository/stats", post(post_repository_stats))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct StatsRequest {
    owner: String,
    repo: String,
}

#[derive(Debug, Serialize)]
struct StatsResponse {
    repository: RepoDescriptor,
    users: Vec<AuthorAggregate>,
    commit_count: usize,
    since: DateTime<Utc>,
    until: DateTime<Utc>,
}

async fn post_repository_stats(
    State(wonder): State<AppState>,
    Json(request): Json<StatsRequest>,
) -> Result<Json<StatsResponse>> {
    if request.owner.trim().is_empty() || request.repo.trim().is_empty() {
        return Err(AppError::InvalidRequest(
            "owner and repo are required".to_string(),
        ));
    }

    let snapshot = wonder.process(&request.owner, &request.repo).await?;

    let mut users: Vec<AuthorAggregate> = snapshot.users.into_values().collect();
    users.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.id.cmp(&b.id)));

    Ok(Json(StatsResponse {
        repository: snapshot.repository,
        users,
        commit_count: snapshot.commits.len(),
        since: snapshot.since,
        until: snapshot.until,
    }))
}
