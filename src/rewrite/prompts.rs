//! Tone presets and the rewrite prompt contract.

use std::fmt;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::RewriteRequest;

/// System message sent with every rewrite.
pub const SYSTEM_MESSAGE: &str = "You polish LinkedIn posts for developers. Keep them authentic, conversational, and concise. Never add new information.";

/// Voice the rewrite model is asked to write in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Professional and factual.
    Pro,
    /// Casual, like talking to teammates.
    Devlife,
    /// Light and slightly witty.
    Fun,
    /// Bare essentials.
    Concise,
    /// Explains the reasoning.
    Detailed,
    /// Positive, progress-focused.
    Optimistic,
}

impl Tone {
    /// Tones used when none are requested.
    pub const DEFAULTS: [Self; 3] = [Self::Pro, Self::Fun, Self::Concise];

    /// Returns the lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pro => "pro",
            Self::Devlife => "devlife",
            Self::Fun => "fun",
            Self::Concise => "concise",
            Self::Detailed => "detailed",
            Self::Optimistic => "optimistic",
        }
    }

    /// Style instruction passed to the model.
    pub fn instructions(self) -> &'static str {
        match self {
            Self::Pro => {
                "Write in a professional, clear, industry-standard tone.\nConcise, factual, and suitable for senior engineers."
            }
            Self::Devlife => {
                "Write like an experienced developer explaining changes to teammates.\nFriendly, casual, but still clear and technical."
            }
            Self::Fun => "Write in a light, playful developer tone.\nStill accurate, but slightly witty.",
            Self::Concise => "Write extremely concise.\nNo fluff. No emojis. Just the essentials.",
            Self::Detailed => {
                "Write in a detailed, explanatory tone.\nProvide context and reasoning behind changes."
            }
            Self::Optimistic => {
                "Write in an optimistic, positive tone.\nFocus on progress and learning, even from challenges."
            }
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds the user prompt for one rewrite.
///
/// Facts are embedded as pretty JSON so the model can check its output
/// against them.
pub fn build_rewrite_prompt(request: &RewriteRequest) -> Result<String> {
    let facts = serde_json::to_string_pretty(&request.facts).context("Failed to serialize post facts")?;
    let constraints = &request.constraints;

    Ok(format!(
        r#"You are rewriting a developer social media post.

Rules:
- Do NOT add new facts
- Do NOT change the meaning
- Keep it authentic and concise
- Avoid buzzwords

Intent: {intent}
Angle: {angle}

Tone:
{tone}

Known facts:
{facts}

Base post:
"""
{draft}
"""

Platform: {platform}
Max length: {max_length}
Emoji allowed: {emoji}

Rewrite the post:
"#,
        intent = request.intent,
        angle = request.angle,
        tone = request.tone.instructions(),
        draft = request.draft,
        platform = constraints.platform,
        max_length = constraints.max_length,
        emoji = constraints.emoji,
    ))
}
