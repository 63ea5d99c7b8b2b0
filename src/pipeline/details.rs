//! Detail Fetcher: enriches listed commits with per-commit statistics.
//!
//! Runs under its own concurrency ceiling, independent of the page limiter,
//! so back-pressure is tunable per phase.

use futures::{SinkExt, StreamExt, channel::mpsc};

use crate::error::{AppError, Result};
use crate::github::RepoService;
use crate::models::{CommitDetail, CommitRef};

/// Fetches full statistics for every ref on `refs`, at most `concurrency`
/// calls in flight, and forwards each result to `details`.
///
/// Every consumed ref yields exactly one outcome: its detail reaches the
/// aggregator, or an error tears the pipeline down. Once this future is
/// dropped by the cancellation scope, unconsumed refs are abandoned without
/// issuing further calls.
pub(crate) async fn fetch_details<S: RepoService>(
    service: &S,
    owner: &str,
    repo: &str,
    refs: mpsc::Receiver<CommitRef>,
    concurrency: usize,
    mut details: mpsc::Sender<CommitDetail>,
) -> Result<()> {
    let mut fetched = refs
        .map(|commit| async move { service.get_commit_detail(owner, repo, &commit.sha).await })
        .buffer_unordered(concurrency);

    while let Some(detail) = fetched.next().await {
        let detail = detail.map_err(|e| AppError::upstream("get commit", e))?;
        details
            .send(detail)
            .await
            .map_err(|_| AppError::Cancelled("detail consumer went away"))?;
    }

    Ok(())
}
