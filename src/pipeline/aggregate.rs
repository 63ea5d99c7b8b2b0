//! Aggregator: sole owner of the snapshot maps, folding enriched commits
//! into per-author totals.

use std::collections::{HashMap, hash_map::Entry};

use chrono::{DateTime, Utc};
use futures::{StreamExt, channel::mpsc};

use crate::error::{AppError, Result};
use crate::models::{
    AuthorAggregate, CommitDetail, RepoDescriptor, RepoSnapshot, UNIDENTIFIED_AUTHOR,
};

/// Consumes the detail stream and builds the snapshot. Runs as the single
/// writer; producers never touch the maps.
pub(crate) async fn aggregate(
    repository: RepoDescriptor,
    since: DateTime<Utc>,
    until: DateTime<Utc>,
    mut details: mpsc::Receiver<CommitDetail>,
) -> Result<RepoSnapshot> {
    let mut users: HashMap<u64, AuthorAggregate> = HashMap::new();
    let mut commits: HashMap<String, CommitDetail> = HashMap::new();

    while let Some(detail) = details.next().await {
        fold(&mut users, &mut commits, detail)?;
    }

    Ok(RepoSnapshot {
        repository,
        users,
        commits,
        since,
        until,
    })
}

/// Folds one commit into the running totals. Commutative and associative in
/// effect: the result does not depend on arrival order.
fn fold(
    users: &mut HashMap<u64, AuthorAggregate>,
    commits: &mut HashMap<String, CommitDetail>,
    detail: CommitDetail,
) -> Result<()> {
    let Entry::Vacant(slot) = commits.entry(detail.sha.clone()) else {
        return Err(AppError::DuplicateSha(detail.sha));
    };

    // Commits with no resolvable account land in the sentinel bucket rather
    // than being dropped.
    let key = detail
        .author_id
        .filter(|&id| id != 0)
        .unwrap_or(UNIDENTIFIED_AUTHOR);
    users
        .entry(key)
        .or_insert_with(|| AuthorAggregate::seeded_from(key, &detail))
        .absorb(&detail);

    slot.insert(detail);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(sha: &str, author_id: Option<u64>, additions: u64, deletions: u64) -> CommitDetail {
        CommitDetail {
            sha: sha.to_string(),
            author_id,
            author_name: "A. Author".to_string(),
            author_login: "author".to_string(),
            author_email: "author@example.com".to_string(),
            additions,
            deletions,
            total: additions + deletions,
        }
    }

    fn fold_all(details: Vec<CommitDetail>) -> Result<HashMap<u64, AuthorAggregate>> {
        let mut users = HashMap::new();
        let mut commits = HashMap::new();
        for d in details {
            fold(&mut users, &mut commits, d)?;
        }
        Ok(users)
    }

    #[test]
    fn accumulates_per_author() {
        let users = fold_all(vec![
            detail("a", Some(7), 10, 2),
            detail("b", Some(7), 5, 1),
        ])
        .unwrap();
        let agg = &users[&7];
        assert_eq!(agg.commits, 2);
        assert_eq!(agg.additions, 15);
        assert_eq!(agg.deletions, 3);
        assert_eq!(agg.total, 18);
    }

    #[test]
    fn unresolved_authors_share_the_sentinel_bucket() {
        let users = fold_all(vec![
            detail("a", None, 1, 0),
            detail("b", Some(0), 2, 0),
        ])
        .unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[&UNIDENTIFIED_AUTHOR].commits, 2);
        assert_eq!(users[&UNIDENTIFIED_AUTHOR].total, 3);
    }

    #[test]
    fn duplicate_sha_is_a_hard_error() {
        let err = fold_all(vec![detail("a", Some(1), 1, 1), detail("a", Some(1), 1, 1)])
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicateSha(sha) if sha == "a"));
    }

    #[test]
    fn duplicate_sha_leaves_totals_untouched() {
        let mut users = HashMap::new();
        let mut commits = HashMap::new();
        fold(&mut users, &mut commits, detail("a", Some(1), 1, 1)).unwrap();
        let before = users[&1].clone();
        assert!(fold(&mut users, &mut commits, detail("a", Some(1), 9, 9)).is_err());
        assert_eq!(users[&1], before);
    }

    #[test]
    fn fold_is_order_independent() {
        let forward = vec![
            detail("a", Some(1), 10, 2),
            detail("b", None, 3, 3),
            detail("c", Some(2), 1, 1),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();
        assert_eq!(fold_all(forward).unwrap(), fold_all(reversed).unwrap());
    }
}
