//! Commit source errors.

use thiserror::Error;

/// Failures fetching commits from GitHub.
#[derive(Error, Debug)]
pub enum SourceError {
    /// Repository argument is not `owner/name`.
    #[error("Invalid repository '{0}'. Expected OWNER/NAME")]
    InvalidRepo(String),

    /// The API answered 404.
    #[error("GitHub resource not found: {0}")]
    NotFound(String),

    /// The API rate limit is exhausted.
    #[error("GitHub API rate limit exceeded. Set GITHUB_TOKEN or try again later")]
    RateLimited,

    /// The API answered with another non-success status.
    #[error("GitHub API request failed: {0}")]
    ApiRequestFailed(String),

    /// The response body did not have the expected shape.
    #[error("Invalid response from GitHub API: {0}")]
    InvalidResponse(String),

    /// Network connectivity error.
    #[error("Network error: {0}")]
    NetworkError(String),
}
