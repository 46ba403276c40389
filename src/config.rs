//! Pipeline configuration with injected defaults.

use anyhow::Result;
use tracing::debug;

use crate::rewrite::openai::{DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE, GROQ_BASE_URL};
use crate::rewrite::{OpenAiCompatibleClient, PostLength, RewriteError, Tone, DEFAULT_CACHE_CAPACITY};
use crate::source::github::DEFAULT_DETAIL_CONCURRENCY;
use crate::source::GitHubClient;
use crate::utils::Settings;

/// API key variables, in lookup order.
pub const API_KEY_VARS: [&str; 2] = ["GROQ_API_KEY", "OPENAI_API_KEY"];

/// Token for GitHub API calls.
pub const GITHUB_TOKEN_VAR: &str = "GITHUB_TOKEN";

/// Overrides the rewrite model.
pub const MODEL_VAR: &str = "COMMITCAST_MODEL";

/// Overrides the chat completions API root.
pub const BASE_URL_VAR: &str = "COMMITCAST_BASE_URL";

/// Platform posts are written for.
pub const DEFAULT_PLATFORM: &str = "linkedin";

/// Settings shared by the analysis and drafting commands.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Rewrite model identifier.
    pub model: String,
    /// Chat completions API root.
    pub base_url: String,
    /// Rewrite API key, when configured.
    pub api_key: Option<String>,
    /// GitHub token, when configured.
    pub github_token: Option<String>,
    /// Rewrite cache size.
    pub cache_capacity: usize,
    /// GitHub commit detail requests kept in flight at once.
    pub detail_concurrency: usize,
    /// Target platform.
    pub platform: String,
    /// Tones drafted when none are requested.
    pub tones: Vec<Tone>,
    /// Target post length.
    pub post_length: PostLength,
    /// Whether emoji are allowed in rewrites.
    pub emoji: bool,
    /// Rewrite response budget.
    pub max_tokens: i32,
    /// Rewrite sampling temperature.
    pub temperature: f32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: GROQ_BASE_URL.to_string(),
            api_key: None,
            github_token: None,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            detail_concurrency: DEFAULT_DETAIL_CONCURRENCY,
            platform: DEFAULT_PLATFORM.to_string(),
            tones: Tone::DEFAULTS.to_vec(),
            post_length: PostLength::default(),
            emoji: true,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl PipelineConfig {
    /// Builds a configuration from the environment and the default settings file.
    pub fn load() -> Result<Self> {
        let settings = Settings::load()?;
        Ok(Self::from_settings(&settings))
    }

    /// Builds a configuration from the environment with `settings` as fallback.
    pub fn from_settings(settings: &Settings) -> Self {
        let defaults = Self::default();
        let config = Self {
            model: settings.get_env_var(MODEL_VAR).unwrap_or(defaults.model),
            base_url: settings.get_env_var(BASE_URL_VAR).unwrap_or(defaults.base_url),
            api_key: settings.get_first_env_var(&API_KEY_VARS),
            github_token: settings.get_env_var(GITHUB_TOKEN_VAR),
            ..defaults
        };
        debug!(
            model = %config.model,
            base_url = %config.base_url,
            has_api_key = config.api_key.is_some(),
            has_github_token = config.github_token.is_some(),
            "Loaded pipeline configuration"
        );
        config
    }

    /// Creates the GitHub client used to fetch commits.
    pub fn github_client(&self) -> GitHubClient {
        GitHubClient::new(self.github_token.clone()).with_detail_concurrency(self.detail_concurrency)
    }

    /// Creates the chat completions client for rewrites.
    pub fn rewrite_client(&self) -> Result<OpenAiCompatibleClient, RewriteError> {
        let api_key = self.api_key.clone().ok_or(RewriteError::ApiKeyNotFound)?;
        Ok(OpenAiCompatibleClient::new(
            self.model.clone(),
            Some(api_key),
            self.base_url.clone(),
            Some(self.max_tokens),
            Some(self.temperature),
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::rewrite::AiClient;
    use std::collections::HashMap;

    #[test]
    fn defaults_match_groq_setup() {
        let config = PipelineConfig::default();
        assert_eq!(config.model, "llama3-8b-8192");
        assert_eq!(config.base_url, "https://api.groq.com/openai");
        assert_eq!(config.cache_capacity, 100);
        assert_eq!(config.detail_concurrency, 4);
        assert_eq!(config.platform, "linkedin");
        assert_eq!(config.tones, vec![Tone::Pro, Tone::Fun, Tone::Concise]);
        assert_eq!(config.post_length.max_length(), 1200);
    }

    #[test]
    fn settings_override_model() {
        let settings = Settings {
            env: HashMap::from([(
                "COMMITCAST_MODEL".to_string(),
                "llama-3.3-70b-versatile".to_string(),
            )]),
        };
        let config = PipelineConfig::from_settings(&settings);
        assert_eq!(config.model, "llama-3.3-70b-versatile");
    }

    #[test]
    fn rewrite_client_requires_key() {
        let config = PipelineConfig::default();
        assert!(matches!(
            config.rewrite_client(),
            Err(RewriteError::ApiKeyNotFound)
        ));

        let config = PipelineConfig {
            api_key: Some("gsk".to_string()),
            ..PipelineConfig::default()
        };
        let client = config.rewrite_client().unwrap();
        assert_eq!(client.get_metadata().provider, "Groq");
    }
}
