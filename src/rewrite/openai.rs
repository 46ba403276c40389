//! OpenAI-compatible chat completions client (Groq, OpenAI, Ollama).

use std::future::Future;
use std::pin::Pin;

use anyhow::Result;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::ai::{AiClient, AiClientMetadata};
use super::error::RewriteError;

/// Groq's OpenAI-compatible endpoint root.
pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai";

/// Small, fast model suited to short rewrites.
pub const DEFAULT_MODEL: &str = "llama3-8b-8192";

/// Response budget for a polished post.
pub const DEFAULT_MAX_TOKENS: i32 = 150;

/// Sampling temperature for rewrites.
pub const DEFAULT_TEMPERATURE: f32 = 0.6;

#[derive(Serialize, Debug)]
struct Message {
    role: String,
    content: String,
}

#[derive(Serialize, Debug)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    stream: bool,
}

#[derive(Deserialize, Debug)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize, Debug)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ChatResponse {
    choices: Vec<Choice>,
    model: Option<String>,
    usage: Option<Usage>,
}

#[derive(Deserialize, Debug)]
#[allow(dead_code)]
struct Usage {
    prompt_tokens: Option<i32>,
    completion_tokens: Option<i32>,
    total_tokens: Option<i32>,
}

/// Chat completions client for any OpenAI-compatible API.
pub struct OpenAiCompatibleClient {
    client: Client,
    /// Bearer token; local servers may not need one.
    api_key: Option<String>,
    model: String,
    /// API root, e.g. `https://api.groq.com/openai`.
    base_url: String,
    max_tokens: Option<i32>,
    temperature: Option<f32>,
}

impl OpenAiCompatibleClient {
    /// Creates a client with explicit settings.
    pub fn new(
        model: String,
        api_key: Option<String>,
        base_url: String,
        max_tokens: Option<i32>,
        temperature: Option<f32>,
    ) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model,
            base_url,
            max_tokens,
            temperature,
        }
    }

    /// Creates a Groq client with the rewrite defaults.
    pub fn new_groq(api_key: String, model: Option<String>) -> Self {
        Self::new(
            model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            Some(api_key),
            GROQ_BASE_URL.to_string(),
            Some(DEFAULT_MAX_TOKENS),
            Some(DEFAULT_TEMPERATURE),
        )
    }

    fn get_api_url(&self) -> String {
        let url = format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'));
        debug!(base_url = %self.base_url, full_url = %url, "Constructed chat completions URL");
        url
    }

    fn provider_name(&self) -> &'static str {
        if self.base_url.contains("groq.com") {
            "Groq"
        } else if self.base_url.contains("localhost") || self.base_url.contains("127.0.0.1") {
            "Ollama"
        } else {
            "OpenAI"
        }
    }
}

impl AiClient for OpenAiCompatibleClient {
    fn send_request<'a>(
        &'a self,
        system_prompt: &'a str,
        user_prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>> {
        Box::pin(async move {
            let mut messages = Vec::new();
            if !system_prompt.is_empty() {
                messages.push(Message {
                    role: "system".to_string(),
                    content: system_prompt.to_string(),
                });
            }
            messages.push(Message {
                role: "user".to_string(),
                content: user_prompt.to_string(),
            });

            let request = ChatRequest {
                model: self.model.clone(),
                messages,
                max_tokens: self.max_tokens,
                temperature: self.temperature,
                stream: false,
            };

            let api_url = self.get_api_url();
            info!(url = %api_url, model = %self.model, "Sending rewrite request");

            let mut req_builder = self
                .client
                .post(&api_url)
                .header("Content-Type", "application/json")
                .json(&request);
            if let Some(ref api_key) = self.api_key {
                req_builder = req_builder.header("Authorization", format!("Bearer {api_key}"));
            }

            let response = req_builder
                .send()
                .await
                .map_err(|e| RewriteError::NetworkError(e.to_string()))?;

            let status = response.status();
            if status == StatusCode::TOO_MANY_REQUESTS {
                return Err(RewriteError::RateLimitExceeded.into());
            }
            if !status.is_success() {
                let error_text = response.text().await.unwrap_or_default();
                return Err(
                    RewriteError::ApiRequestFailed(format!("HTTP {status}: {error_text}")).into(),
                );
            }

            let chat: ChatResponse = response
                .json()
                .await
                .map_err(|e| RewriteError::InvalidResponseFormat(e.to_string()))?;

            debug!(
                choice_count = chat.choices.len(),
                model = ?chat.model,
                usage = ?chat.usage,
                "Received chat completions response"
            );

            chat.choices
                .into_iter()
                .next()
                .and_then(|choice| choice.message.content)
                .map(|content| content.trim().to_string())
                .ok_or_else(|| {
                    RewriteError::InvalidResponseFormat("No choices in response".to_string()).into()
                })
        })
    }

    fn get_metadata(&self) -> AiClientMetadata {
        AiClientMetadata {
            provider: self.provider_name().to_string(),
            model: self.model.clone(),
            max_response_length: self
                .max_tokens
                .and_then(|t| usize::try_from(t).ok())
                .unwrap_or(4096),
        }
    }
}
