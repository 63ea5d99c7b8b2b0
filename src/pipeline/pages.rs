//! Page Fetcher: discovers the page count from the first listing response,
//! then fans out over the remaining pages under a bounded limiter.

use chrono::{DateTime, Utc};
use futures::{SinkExt, StreamExt, channel::mpsc, stream};

use crate::error::{AppError, Result};
use crate::github::RepoService;
use crate::models::CommitRef;

/// Streams every commit ref in the window into `refs`.
///
/// The first page is fetched up front to learn `last_page`; its refs are
/// emitted immediately. Pages `2..=last_page` then run concurrently, at most
/// `concurrency` in flight. A single page failure fails the whole fetch;
/// refs already emitted are not retracted.
pub(crate) async fn fetch_pages<S: RepoService>(
    service: &S,
    owner: &str,
    repo: &str,
    since: DateTime<Utc>,
    page_size: u32,
    concurrency: usize,
    mut refs: mpsc::Sender<CommitRef>,
) -> Result<()> {
    let first = service
        .list_commits(owner, repo, 1, page_size, since)
        .await
        .map_err(|e| AppError::upstream("list commits", e))?;
    let last_page = first.pagination.last_page.max(1);
    tracing::debug!(owner, repo, last_page, "page count discovered");

    for commit in first.refs {
        send_ref(&mut refs, commit).await?;
    }

    let mut pages = stream::iter(2..=last_page)
        .map(|page| service.list_commits(owner, repo, page, page_size, since))
        .buffer_unordered(concurrency);

    // Pages land in completion order; refs within a page keep their order.
    while let Some(page) = pages.next().await {
        let page = page.map_err(|e| AppError::upstream("list commits", e))?;
        for commit in page.refs {
            send_ref(&mut refs, commit).await?;
        }
    }

    Ok(())
}

async fn send_ref(refs: &mut mpsc::Sender<CommitRef>, commit: CommitRef) -> Result<()> {
    refs.send(commit)
        .await
        .map_err(|_| AppError::Cancelled("commit ref consumer went away"))
}
