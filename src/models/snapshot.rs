use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::CommitDetail;

/// Reserved aggregate key collecting commits with no resolvable account.
pub const UNIDENTIFIED_AUTHOR: u64 = 0;

/// Repository metadata fetched before any listing starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoDescriptor {
    pub id: u64,
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub default_branch: Option<String>,
}

/// Per-author running totals, keyed by account id in `RepoSnapshot::users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorAggregate {
    pub id: u64,
    pub name: String,
    pub login: String,
    pub email: String,
    pub commits: u64,
    pub additions: u64,
    pub deletions: u64,
    pub total: u64,
}

impl AuthorAggregate {
    /// Empty aggregate seeded from the first commit seen for this author.
    pub fn seeded_from(id: u64, detail: &CommitDetail) -> Self {
        Self {
            id,
            name: detail.author_name.clone(),
            login: detail.author_login.clone(),
            email: detail.author_email.clone(),
            commits: 0,
            additions: 0,
            deletions: 0,
            total: 0,
        }
    }

    pub fn absorb(&mut self, detail: &CommitDetail) {
        self.additions += detail.additions;
        self.deletions += detail.deletions;
        self.total += detail.total;
        self.commits += 1;
    }
}

/// One repository's aggregated history over the lookback window.
///
/// Built fresh for every `process` call, immutable once returned, and never
/// shared across calls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepoSnapshot {
    pub repository: RepoDescriptor,
    pub users: HashMap<u64, AuthorAggregate>,
    pub commits: HashMap<String, CommitDetail>,
    pub since: DateTime<Utc>,
    pub until: DateTime<Utc>,
}
