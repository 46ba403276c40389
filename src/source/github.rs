//! GitHub REST client for recent commit activity.

use anyhow::Result;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use futures::stream::{self, StreamExt, TryStreamExt};
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info};

use super::error::SourceError;
use crate::data::{ChangedFile, CommitAuthor, CommitRecord};

/// Public GitHub API root.
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// How far back "recent" reaches.
pub const LOOKBACK_HOURS: i64 = 24;

/// Commits requested per listing page.
const PER_PAGE: usize = 100;

/// Commit detail requests kept in flight at once.
pub const DEFAULT_DETAIL_CONCURRENCY: usize = 4;

/// Entry of the commit listing endpoint.
#[derive(Debug, Deserialize)]
struct CommitListing {
    sha: String,
}

/// Author block inside a commit detail.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubCommitAuthor {
    /// Display name.
    pub name: String,
    /// Authoring timestamp.
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

/// Git-level part of a commit detail.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubCommitInfo {
    /// Full commit message.
    pub message: String,
    /// Git author, absent for some imported commits.
    #[serde(default)]
    pub author: Option<GitHubCommitAuthor>,
}

/// Response of `GET /repos/{repo}/commits/{sha}`.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubCommitDetail {
    /// Full commit SHA.
    pub sha: String,
    /// Message and author.
    pub commit: GitHubCommitInfo,
    /// Changed files with patches.
    #[serde(default)]
    pub files: Vec<ChangedFile>,
}

impl GitHubCommitDetail {
    /// Flattens the API shape into a [`CommitRecord`].
    pub fn into_record(self, repo: Option<String>) -> CommitRecord {
        let author = self
            .commit
            .author
            .map(|a| CommitAuthor {
                name: a.name,
                date: a.date,
            })
            .unwrap_or_default();
        CommitRecord {
            sha: self.sha,
            message: self.commit.message,
            author,
            files: self.files,
            repo,
        }
    }
}

/// Minimal GitHub REST client.
pub struct GitHubClient {
    client: Client,
    base_url: String,
    token: Option<String>,
    detail_concurrency: usize,
}

impl GitHubClient {
    /// Creates a client for the public API.
    pub fn new(token: Option<String>) -> Self {
        Self::with_base_url(GITHUB_API_URL.to_string(), token)
    }

    /// Creates a client for a custom API root, such as GitHub Enterprise.
    pub fn with_base_url(base_url: String, token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            detail_concurrency: DEFAULT_DETAIL_CONCURRENCY,
        }
    }

    /// Caps how many commit details are requested at once; zero means one.
    #[must_use]
    pub fn with_detail_concurrency(mut self, limit: usize) -> Self {
        self.detail_concurrency = limit.max(1);
        self
    }

    /// Fetches the last day's commits of `repo`, with file patches.
    pub async fn fetch_recent_commits(
        &self,
        repo: &str,
        author: Option<&str>,
    ) -> Result<Vec<CommitRecord>> {
        let since = Utc::now() - Duration::hours(LOOKBACK_HOURS);
        self.fetch_commits_since(repo, author, since).await
    }

    /// Fetches the last day's commits of every repo in `repos`.
    ///
    /// Repos are queried one after another and their commits concatenated
    /// in the order given, so a single analysis can span all of them.
    pub async fn fetch_recent_commits_across(
        &self,
        repos: &[String],
        author: Option<&str>,
    ) -> Result<Vec<CommitRecord>> {
        let since = Utc::now() - Duration::hours(LOOKBACK_HOURS);
        let mut records = Vec::new();
        for repo in repos {
            records.extend(self.fetch_commits_since(repo, author, since).await?);
        }
        info!(repos = repos.len(), count = records.len(), "Fetched commits across repos");
        Ok(records)
    }

    /// Fetches commits of `repo` newer than `since`, with file patches.
    ///
    /// At most `detail_concurrency` detail requests are in flight; records
    /// keep the order of the listing.
    pub async fn fetch_commits_since(
        &self,
        repo: &str,
        author: Option<&str>,
        since: DateTime<Utc>,
    ) -> Result<Vec<CommitRecord>> {
        validate_repo(repo)?;

        let url = format!("{}/repos/{repo}/commits", self.base_url);
        let mut query = vec![
            ("since", since.to_rfc3339_opts(SecondsFormat::Secs, true)),
            ("per_page", PER_PAGE.to_string()),
        ];
        if let Some(author) = author {
            query.push(("author", author.to_string()));
        }

        info!(repo, author = ?author, since = %since, "Fetching commits");
        let listing: Vec<CommitListing> = self.get_json(self.client.get(&url).query(&query), &url).await?;
        info!(repo, count = listing.len(), "Found commits");

        let details: Vec<GitHubCommitDetail> = stream::iter(&listing)
            .map(|c| self.fetch_commit(repo, &c.sha))
            .buffered(self.detail_concurrency)
            .try_collect()
            .await?;

        Ok(details
            .into_iter()
            .map(|detail| detail.into_record(Some(repo.to_string())))
            .collect())
    }

    /// Fetches one commit with its files.
    pub async fn fetch_commit(&self, repo: &str, sha: &str) -> Result<GitHubCommitDetail> {
        let url = format!("{}/repos/{repo}/commits/{sha}", self.base_url);
        let detail: GitHubCommitDetail = self.get_json(self.client.get(&url), &url).await?;
        debug!(sha, files = detail.files.len(), "Fetched commit detail");
        Ok(detail)
    }

    async fn get_json<T: DeserializeOwned>(&self, request: RequestBuilder, url: &str) -> Result<T> {
        let mut request = request
            .header(ACCEPT, "application/vnd.github.v3+json")
            .header(USER_AGENT, concat!("commitcast/", env!("CARGO_PKG_VERSION")));
        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SourceError::NetworkError(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound(url.to_string()).into());
        }
        let exhausted = response
            .headers()
            .get("x-ratelimit-remaining")
            .is_some_and(|v| v.as_bytes() == b"0");
        if status == StatusCode::TOO_MANY_REQUESTS || (status == StatusCode::FORBIDDEN && exhausted) {
            return Err(SourceError::RateLimited.into());
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(SourceError::ApiRequestFailed(format!("HTTP {status}: {text}")).into());
        }

        response
            .json::<T>()
            .await
            .map_err(|e| SourceError::InvalidResponse(e.to_string()).into())
    }
}

/// Checks that `repo` looks like `owner/name`.
pub fn validate_repo(repo: &str) -> Result<(), SourceError> {
    match repo.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => Ok(()),
        _ => Err(SourceError::InvalidRepo(repo.to_string())),
    }
}
