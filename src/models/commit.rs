use serde::{Deserialize, Serialize};

/// Minimal commit identifier discovered while listing history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRef {
    pub sha: String,
}

/// Fully enriched commit produced by the per-commit detail call.
///
/// `author_id` is `None` when GitHub cannot resolve the commit to an
/// account: bot commits, deleted accounts, or commits carrying only raw git
/// author metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitDetail {
    pub sha: String,
    pub author_id: Option<u64>,
    pub author_name: String,
    pub author_login: String,
    pub author_email: String,
    pub additions: u64,
    pub deletions: u64,
    pub total: u64,
}
