//! Scripted chat client for rewrite tests.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};

use super::ai::{AiClient, AiClientMetadata};

/// One request seen by [`ScriptedClient`].
#[derive(Debug, Clone)]
pub(crate) struct SentPrompt {
    pub(crate) system: String,
    pub(crate) user: String,
}

#[derive(Default)]
struct Script {
    replies: VecDeque<Result<String>>,
    sent: Vec<SentPrompt>,
}

/// Replies with queued results in order and keeps every prompt it was sent.
///
/// An exhausted queue answers with an error, which the rewriter treats like
/// any failed request.
pub(crate) struct ScriptedClient {
    script: Arc<Mutex<Script>>,
}

impl ScriptedClient {
    pub(crate) fn new(replies: Vec<Result<String>>) -> Self {
        Self {
            script: Arc::new(Mutex::new(Script {
                replies: replies.into(),
                sent: Vec::new(),
            })),
        }
    }

    /// Handle that stays readable after the client moves into a
    /// [`Rewriter`](super::Rewriter).
    pub(crate) fn log(&self) -> SentLog {
        SentLog {
            script: Arc::clone(&self.script),
        }
    }
}

/// Read side of a [`ScriptedClient`].
pub(crate) struct SentLog {
    script: Arc<Mutex<Script>>,
}

impl SentLog {
    pub(crate) fn sent(&self) -> Vec<SentPrompt> {
        self.script.lock().unwrap().sent.clone()
    }

    pub(crate) fn count(&self) -> usize {
        self.script.lock().unwrap().sent.len()
    }
}

impl AiClient for ScriptedClient {
    fn send_request<'a>(
        &'a self,
        system_prompt: &'a str,
        user_prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>> {
        Box::pin(async move {
            let mut script = self.script.lock().unwrap();
            script.sent.push(SentPrompt {
                system: system_prompt.to_string(),
                user: user_prompt.to_string(),
            });
            script
                .replies
                .pop_front()
                .unwrap_or_else(|| Err(anyhow!("script exhausted")))
        })
    }

    fn get_metadata(&self) -> AiClientMetadata {
        AiClientMetadata {
            provider: "Scripted".to_string(),
            model: "scripted".to_string(),
            max_response_length: 150,
        }
    }
}
