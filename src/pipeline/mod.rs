//! Commit-stats pipeline: paginated listing, per-commit enrichment, and
//! per-author aggregation under one cancellation-linked scope.
//!
//! Three stages run concurrently per `process` call, connected by bounded
//! channels: the Page Fetcher emits commit refs, the Detail Fetcher enriches
//! them, and the Aggregator folds the results into a [`RepoSnapshot`]. The
//! first stage to fail wins; `try_join!` drops the other stage futures
//! before their next await, so no further upstream calls are issued.

mod aggregate;
mod details;
mod pages;

use chrono::{DateTime, Duration, NaiveTime, Utc};
use futures::channel::mpsc;
use tokio::time;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::github::RepoService;
use crate::models::RepoSnapshot;

/// Buffered slots between pipeline stages. Lets producers run slightly
/// ahead of consumers without unbounded queueing.
const STAGE_BUFFER: usize = 64;

/// Commit-stats orchestrator.
///
/// Holds only configuration and the upstream client; no per-request state,
/// so one instance serves any number of concurrent `process` calls.
pub struct Wonder<S> {
    service: S,
    config: Config,
}

impl<S: RepoService> Wonder<S> {
    pub fn new(service: S, config: Config) -> Self {
        Self { service, config }
    }

    /// Aggregates per-author commit statistics for `owner/repo` over the
    /// configured lookback window.
    pub async fn process(&self, owner: &str, repo: &str) -> Result<RepoSnapshot> {
        match self.config.request_timeout {
            Some(deadline) => time::timeout(deadline, self.run(owner, repo))
                .await
                .map_err(|_| AppError::Cancelled("request deadline elapsed"))?,
            None => self.run(owner, repo).await,
        }
    }

    async fn run(&self, owner: &str, repo: &str) -> Result<RepoSnapshot> {
        let repository = self
            .service
            .get_repository(owner, repo)
            .await
            .map_err(|e| AppError::upstream("get repository", e))?;

        let until = Utc::now();
        let since = window_start(until, self.config.since_days);

        let (ref_tx, ref_rx) = mpsc::channel(STAGE_BUFFER);
        let (detail_tx, detail_rx) = mpsc::channel(STAGE_BUFFER);

        let pages = pages::fetch_pages(
            &self.service,
            owner,
            repo,
            since,
            self.config.page_size,
            self.config.page_concurrency,
            ref_tx,
        );
        let details = details::fetch_details(
            &self.service,
            owner,
            repo,
            ref_rx,
            self.config.detail_concurrency,
            detail_tx,
        );
        let snapshot = aggregate::aggregate(repository, since, until, detail_rx);

        let (_, _, snapshot) = tokio::try_join!(pages, details, snapshot)?;
        tracing::info!(
            repo = %snapshot.repository.full_name,
            commits = snapshot.commits.len(),
            authors = snapshot.users.len(),
            "repository processed"
        );
        Ok(snapshot)
    }
}

/// Midnight-truncated start of the lookback window.
fn window_start(until: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    (until - Duration::days(days))
        .date_naive()
        .and_time(NaiveTime::MIN)
        .and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_start_truncates_to_midnight() {
        let until = "2026-08-23T15:04:05Z".parse::<DateTime<Utc>>().unwrap();
        let since = window_start(until, 45);
        assert_eq!(since.to_rfc3339(), "2026-07-09T00:00:00+00:00");
    }
}
