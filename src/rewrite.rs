//! LLM polishing of drafted posts.
//!
//! The [`Rewriter`] never fails: when the AI call errors or returns nothing
//! usable, the draft is returned unchanged.

pub mod ai;
pub mod cache;
pub mod error;
pub mod openai;
pub mod prompts;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
pub(crate) mod test_utils;

use std::sync::{Mutex, PoisonError};

use anyhow::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub use ai::{AiClient, AiClientMetadata};
pub use cache::FifoCache;
pub use error::RewriteError;
pub use openai::OpenAiCompatibleClient;
pub use prompts::{build_rewrite_prompt, Tone, SYSTEM_MESSAGE};

/// Default number of cached rewrites.
pub const DEFAULT_CACHE_CAPACITY: usize = 100;

/// Draft characters that contribute to the cache key.
const CACHE_KEY_PREFIX_CHARS: usize = 100;

/// Target post length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PostLength {
    /// Up to 600 characters.
    Quick,
    /// Up to 1200 characters.
    #[default]
    Standard,
    /// Up to 2500 characters.
    Detailed,
}

impl PostLength {
    /// Maximum characters the rewrite may use.
    pub fn max_length(self) -> usize {
        match self {
            Self::Quick => 600,
            Self::Standard => 1200,
            Self::Detailed => 2500,
        }
    }
}

/// Facts the rewrite must preserve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostFacts {
    /// Commits analysed.
    pub commits: usize,
    /// Files with signals.
    pub files_changed: usize,
    /// Feature label, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature: Option<String>,
}

/// Output limits for a rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteConstraints {
    /// Target platform, e.g. `linkedin`.
    pub platform: String,
    /// Character limit.
    pub max_length: usize,
    /// Whether emoji are allowed.
    pub emoji: bool,
}

/// Everything needed to polish one draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteRequest {
    /// Templated draft.
    pub draft: String,
    /// Idea kind the draft was built from.
    pub intent: String,
    /// Idea angle.
    pub angle: String,
    /// Facts that must survive the rewrite.
    pub facts: PostFacts,
    /// Requested voice.
    pub tone: Tone,
    /// Output limits.
    pub constraints: RewriteConstraints,
}

impl RewriteRequest {
    /// Key under which the rewrite is cached: the draft's first characters,
    /// the tone and the platform.
    pub fn cache_key(&self) -> String {
        let prefix: String = self.draft.chars().take(CACHE_KEY_PREFIX_CHARS).collect();
        format!("{prefix}|{}|{}", self.tone, self.constraints.platform)
    }
}

/// Polishes drafts through an AI client, with a bounded response cache.
pub struct Rewriter {
    client: Box<dyn AiClient>,
    cache: Mutex<FifoCache<String, String>>,
}

impl Rewriter {
    /// Creates a rewriter caching up to `cache_capacity` responses.
    pub fn new(client: Box<dyn AiClient>, cache_capacity: usize) -> Self {
        let metadata = client.get_metadata();
        debug!(
            provider = %metadata.provider,
            model = %metadata.model,
            cache_capacity,
            "Created rewriter"
        );
        Self {
            client,
            cache: Mutex::new(FifoCache::new(cache_capacity)),
        }
    }

    /// Returns the polished post, or the draft when rewriting fails.
    pub async fn polish(&self, request: &RewriteRequest) -> String {
        let key = request.cache_key();
        if let Some(hit) = self.cached(&key) {
            debug!(tone = %request.tone, "Rewrite cache hit");
            return hit;
        }

        match self.rewrite(request).await {
            Ok(text) => {
                self.cache
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .insert(key, text.clone());
                text
            }
            Err(err) => {
                warn!(tone = %request.tone, error = %err, "AI rewrite failed, using draft");
                request.draft.clone()
            }
        }
    }

    /// Sends one rewrite request without caching or fallback.
    pub async fn rewrite(&self, request: &RewriteRequest) -> Result<String> {
        let prompt = build_rewrite_prompt(request)?;
        let response = self.client.send_request(SYSTEM_MESSAGE, &prompt).await?;
        let text = response.trim();
        if text.is_empty() {
            return Err(RewriteError::EmptyResponse.into());
        }
        Ok(text.to_string())
    }

    fn cached(&self, key: &str) -> Option<String> {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::test_utils::ScriptedClient;
    use super::*;

    fn request(draft: &str, tone: Tone) -> RewriteRequest {
        RewriteRequest {
            draft: draft.to_string(),
            intent: "daily_summary".to_string(),
            angle: "productivity".to_string(),
            facts: PostFacts {
                commits: 3,
                files_changed: 5,
                feature: None,
            },
            tone,
            constraints: RewriteConstraints {
                platform: "linkedin".to_string(),
                max_length: PostLength::Standard.max_length(),
                emoji: true,
            },
        }
    }

    #[tokio::test]
    async fn polish_returns_trimmed_response_and_caches_it() {
        let client = ScriptedClient::new(vec![Ok("  Better post.\n".to_string())]);
        let log = client.log();
        let rewriter = Rewriter::new(Box::new(client), DEFAULT_CACHE_CAPACITY);

        let req = request("Wrapped up today with 3 commits.", Tone::Pro);
        assert_eq!(rewriter.polish(&req).await, "Better post.");
        // Second call is served from the cache; the script has no more replies.
        assert_eq!(rewriter.polish(&req).await, "Better post.");
        assert_eq!(log.count(), 1);

        let sent = &log.sent()[0];
        assert_eq!(sent.system, SYSTEM_MESSAGE);
        assert!(sent.user.contains("Wrapped up today with 3 commits."));
    }

    #[tokio::test]
    async fn polish_falls_back_to_draft_on_error() {
        let client = ScriptedClient::new(vec![Err(anyhow::anyhow!("HTTP 500"))]);
        let rewriter = Rewriter::new(Box::new(client), DEFAULT_CACHE_CAPACITY);
        let req = request("Original draft.", Tone::Fun);
        assert_eq!(rewriter.polish(&req).await, "Original draft.");
    }

    #[tokio::test]
    async fn empty_response_falls_back_and_is_not_cached() {
        let client = ScriptedClient::new(vec![Ok("   ".to_string()), Ok("Fixed.".to_string())]);
        let rewriter = Rewriter::new(Box::new(client), DEFAULT_CACHE_CAPACITY);
        let req = request("Draft.", Tone::Concise);
        assert_eq!(rewriter.polish(&req).await, "Draft.");
        assert_eq!(rewriter.polish(&req).await, "Fixed.");
    }

    #[tokio::test]
    async fn tone_is_part_of_cache_key() {
        let client = ScriptedClient::new(vec![Ok("pro".to_string()), Ok("fun".to_string())]);
        let log = client.log();
        let rewriter = Rewriter::new(Box::new(client), DEFAULT_CACHE_CAPACITY);
        assert_eq!(rewriter.polish(&request("Same.", Tone::Pro)).await, "pro");
        assert_eq!(rewriter.polish(&request("Same.", Tone::Fun)).await, "fun");
        assert_eq!(log.count(), 2);
    }

    #[test]
    fn cache_key_uses_draft_prefix() {
        let long = "x".repeat(250);
        let a = request(&format!("{long}a"), Tone::Pro);
        let b = request(&format!("{long}b"), Tone::Pro);
        assert_eq!(a.cache_key(), b.cache_key());
        assert_eq!(a.cache_key(), format!("{}|pro|linkedin", "x".repeat(100)));
    }

    #[test]
    fn post_length_limits() {
        assert_eq!(PostLength::Quick.max_length(), 600);
        assert_eq!(PostLength::default().max_length(), 1200);
        assert_eq!(PostLength::Detailed.max_length(), 2500);
    }
}
