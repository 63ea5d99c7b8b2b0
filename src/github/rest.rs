//! reqwest-backed GitHub REST v3 client.
//!
//! Listing pagination follows the `Link` response header: the first page's
//! `rel="last"` entry gives the total page count. Commit statistics only
//! appear on the single-commit endpoint, never in bulk listings.

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{Client, Response, StatusCode, header};
use serde::Deserialize;

use super::{CommitPage, Pagination, RepoService, UpstreamError};
use crate::models::{CommitDetail, CommitRef, RepoDescriptor};

const API_ROOT: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("wonder/", env!("CARGO_PKG_VERSION"));

/// GitHub REST client. Cheap to clone; wraps a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    base: String,
}

impl GitHubClient {
    pub fn new(token: Option<&str>) -> anyhow::Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        if let Some(token) = token {
            let mut value = header::HeaderValue::from_str(&format!("Bearer {token}"))?;
            value.set_sensitive(true);
            headers.insert(header::AUTHORIZATION, value);
        }

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            base: API_ROOT.to_string(),
        })
    }

    async fn check(response: Response, what: &str) -> Result<Response, UpstreamError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        match status {
            StatusCode::UNAUTHORIZED => Err(UpstreamError::Auth(status.as_u16())),
            StatusCode::FORBIDDEN => {
                // GitHub reports rate-limit exhaustion as 403 with a header.
                let exhausted = response
                    .headers()
                    .get("x-ratelimit-remaining")
                    .and_then(|v| v.to_str().ok())
                    == Some("0");
                if exhausted {
                    Err(UpstreamError::RateLimited)
                } else {
                    Err(UpstreamError::Auth(status.as_u16()))
                }
            }
            StatusCode::NOT_FOUND => Err(UpstreamError::NotFound(what.to_string())),
            _ => {
                let body = response.text().await.unwrap_or_default();
                Err(UpstreamError::Status {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }
}

impl RepoService for GitHubClient {
    async fn get_repository(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<RepoDescriptor, UpstreamError> {
        let url = format!("{}/repos/{owner}/{repo}", self.base);
        let response = self.http.get(&url).send().await?;
        let response = Self::check(response, &format!("{owner}/{repo}")).await?;
        Ok(response.json().await?)
    }

    async fn list_commits(
        &self,
        owner: &str,
        repo: &str,
        page: u32,
        per_page: u32,
        since: DateTime<Utc>,
    ) -> Result<CommitPage, UpstreamError> {
        let url = format!("{}/repos/{owner}/{repo}/commits", self.base);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("page", page.to_string()),
                ("per_page", per_page.to_string()),
                ("since", since.to_rfc3339_opts(SecondsFormat::Secs, true)),
            ])
            .send()
            .await?;
        let response = Self::check(response, &format!("{owner}/{repo} commits")).await?;

        // The final page carries no rel="last" entry; it is its own last page.
        let last_page = response
            .headers()
            .get(header::LINK)
            .and_then(|v| v.to_str().ok())
            .and_then(last_page_from_link)
            .unwrap_or(page);

        let listed: Vec<ListedCommit> = response.json().await?;
        tracing::debug!(owner, repo, page, refs = listed.len(), "listed commits");

        Ok(CommitPage {
            refs: listed
                .into_iter()
                .map(|c| CommitRef { sha: c.sha })
                .collect(),
            pagination: Pagination {
                current_page: page,
                last_page,
            },
        })
    }

    async fn get_commit_detail(
        &self,
        owner: &str,
        repo: &str,
        sha: &str,
    ) -> Result<CommitDetail, UpstreamError> {
        let url = format!("{}/repos/{owner}/{repo}/commits/{sha}", self.base);
        let response = self.http.get(&url).send().await?;
        let response = Self::check(response, &format!("{owner}/{repo}@{sha}")).await?;
        let full: FullCommit = response.json().await?;
        Ok(full.into())
    }
}

/// Extracts the `rel="last"` page number from a `Link` header, e.g.
/// `<https://api.github.com/...?page=34&per_page=100>; rel="last"`.
fn last_page_from_link(link: &str) -> Option<u32> {
    for part in link.split(',') {
        let Some((target, params)) = part.split_once(';') else {
            continue;
        };
        if !params.contains("rel=\"last\"") {
            continue;
        }
        let target = target.trim().trim_start_matches('<').trim_end_matches('>');
        let (_, query) = target.split_once('?')?;
        for pair in query.split('&') {
            if let Some(page) = pair.strip_prefix("page=") {
                return page.parse().ok();
            }
        }
    }
    None
}

#[derive(Debug, Deserialize)]
struct ListedCommit {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct FullCommit {
    sha: String,
    author: Option<Account>,
    commit: GitCommit,
    #[serde(default)]
    stats: Option<Stats>,
}

#[derive(Debug, Deserialize)]
struct Account {
    id: u64,
    #[serde(default)]
    login: String,
}

#[derive(Debug, Deserialize)]
struct GitCommit {
    author: Option<GitSignature>,
}

#[derive(Debug, Default, Deserialize)]
struct GitSignature {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
}

#[derive(Debug, Default, Deserialize)]
struct Stats {
    #[serde(default)]
    additions: u64,
    #[serde(default)]
    deletions: u64,
    #[serde(default)]
    total: u64,
}

impl From<FullCommit> for CommitDetail {
    fn from(full: FullCommit) -> Self {
        let signature = full.commit.author.unwrap_or_default();
        let stats = full.stats.unwrap_or_default();
        // A missing or zero-id account means the commit has no resolvable
        // author; the aggregator routes those to the sentinel bucket.
        let (author_id, author_login) = match full.author {
            Some(account) if account.id != 0 => (Some(account.id), account.login),
            Some(account) => (None, account.login),
            None => (None, String::new()),
        };
        CommitDetail {
            sha: full.sha,
            author_id,
            author_name: signature.name,
            author_login,
            author_email: signature.email,
            additions: stats.additions,
            deletions: stats.deletions,
            total: stats.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_last_page_from_link_header() {
        let link = "<https://api.github.com/repos/o/r/commits?since=2019-01-01T00%3A00%3A00Z&page=2>; rel=\"next\", \
                    <https://api.github.com/repos/o/r/commits?since=2019-01-01T00%3A00%3A00Z&page=34>; rel=\"last\"";
        assert_eq!(last_page_from_link(link), Some(34));
    }

    #[test]
    fn final_page_has_no_last_rel() {
        let link = "<https://api.github.com/repos/o/r/commits?page=33>; rel=\"prev\", \
                    <https://api.github.com/repos/o/r/commits?page=1>; rel=\"first\"";
        assert_eq!(last_page_from_link(link), None);
    }

    #[test]
    fn malformed_link_is_ignored() {
        assert_eq!(last_page_from_link("nonsense"), None);
        assert_eq!(last_page_from_link("<no-query>; rel=\"last\""), None);
    }

    #[test]
    fn full_commit_maps_missing_author_to_none() {
        let json = serde_json::json!({
            "sha": "abc",
            "author": null,
            "commit": { "author": { "name": "Raw Author", "email": "raw@example.com" } },
            "stats": { "additions": 3, "deletions": 1, "total": 4 }
        });
        let detail: CommitDetail = serde_json::from_value::<FullCommit>(json).unwrap().into();
        assert_eq!(detail.author_id, None);
        assert_eq!(detail.author_name, "Raw Author");
        assert_eq!(detail.total, 4);
    }

    #[test]
    fn full_commit_maps_zero_id_to_none() {
        let json = serde_json::json!({
            "sha": "abc",
            "author": { "id": 0, "login": "ghost" },
            "commit": { "author": null },
        });
        let detail: CommitDetail = serde_json::from_value::<FullCommit>(json).unwrap().into();
        assert_eq!(detail.author_id, None);
        assert_eq!(detail.author_login, "ghost");
        assert_eq!(detail.total, 0);
    }
}
