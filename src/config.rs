//! Runtime configuration, validated once at startup and consumed as-is by
//! the pipeline.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    /// GitHub OAuth2 token. Unauthenticated requests work but are heavily
    /// rate limited.
    pub token: Option<String>,
    /// Max in-flight page-listing calls.
    pub page_concurrency: usize,
    /// Max in-flight commit-detail calls, independent of the page ceiling.
    pub detail_concurrency: usize,
    /// Commits per listing page (GitHub caps this at 100).
    pub page_size: u32,
    /// Lookback window in days.
    pub since_days: i64,
    /// Per-request deadline; `None` disables it.
    pub request_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token: None,
            page_concurrency: 20,
            detail_concurrency: 20,
            page_size: 100,
            since_days: 45,
            request_timeout: None,
        }
    }
}

impl Config {
    pub fn validate(self) -> anyhow::Result<Self> {
        anyhow::ensure!(self.page_concurrency > 0, "page concurrency must be positive");
        anyhow::ensure!(self.detail_concurrency > 0, "detail concurrency must be positive");
        anyhow::ensure!(
            (1..=100).contains(&self.page_size),
            "page size must be within 1..=100"
        );
        anyhow::ensure!(self.since_days > 0, "lookback window must be positive");
        Ok(self)
    }
}
