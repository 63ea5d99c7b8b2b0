//! API route handlers - thin JSON plumbing around the pipeline.
//!
//! - `status`: service liveness and current time (GET /api/v1/status)
//! - `stats`: per-author commit statistics (POST /api/v1/repository/stats)

pub mod stats;
pub mod status;

use std::sync::Arc;

use axum::Router;

use crate::github::GitHubClient;
use crate::pipeline::Wonder;

pub type AppState = Arc<Wonder<GitHubClient>>;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(status::routes())
        .merge(stats::routes(state))
}
