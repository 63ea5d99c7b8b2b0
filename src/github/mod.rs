//! Upstream GitHub collaborator.
//!
//! `RepoService` is the black-box interface the pipeline depends on;
//! `GitHubClient` is its REST-backed production implementation. Tests
//! substitute in-memory fixtures.

pub mod rest;

pub use rest::GitHubClient;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{CommitDetail, CommitRef, RepoDescriptor};

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("authentication rejected (HTTP {0})")]
    Auth(u16),

    #[error("rate limited")]
    RateLimited,

    #[error("not found: {0}")]
    NotFound(String),

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },
}

/// Pagination metadata returned alongside one page of commit refs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub current_page: u32,
    pub last_page: u32,
}

/// One page of listed commits.
#[derive(Debug, Clone)]
pub struct CommitPage {
    pub refs: Vec<CommitRef>,
    pub pagination: Pagination,
}

/// Repository access used by the pipeline.
///
/// Bulk listing does not include per-commit statistics, so every commit is
/// fetched individually through `get_commit_detail`.
#[allow(async_fn_in_trait)]
pub trait RepoService {
    async fn get_repository(&self, owner: &str, repo: &str)
    -> Result<RepoDescriptor, UpstreamError>;

    async fn list_commits(
        &self,
        owner: &str,
        repo: &str,
        page: u32,
        per_page: u32,
        since: DateTime<Utc>,
    ) -> Result<CommitPage, UpstreamError>;

    async fn get_commit_detail(
        &self,
        owner: &str,
        repo: &str,
        sha: &str,
    ) -> Result<CommitDetail, UpstreamError>;
}
