//! Rewrite service errors.

use thiserror::Error;

/// Failures talking to the chat completions API.
#[derive(Error, Debug)]
pub enum RewriteError {
    /// No API key in the environment or settings.
    #[error("Rewrite API key not found. Set GROQ_API_KEY or OPENAI_API_KEY environment variable")]
    ApiKeyNotFound,

    /// The API answered with a non-success status.
    #[error("Rewrite API request failed: {0}")]
    ApiRequestFailed(String),

    /// The API answered 429.
    #[error("Rate limit exceeded. Please try again later")]
    RateLimitExceeded,

    /// The response body did not have the expected shape.
    #[error("Invalid response format from rewrite API: {0}")]
    InvalidResponseFormat(String),

    /// The model returned only whitespace.
    #[error("Rewrite API returned an empty post")]
    EmptyResponse,

    /// Network connectivity error.
    #[error("Network error: {0}")]
    NetworkError(String),
}
