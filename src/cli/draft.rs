//! `commitcast draft`.

use anyhow::Result;
use clap::Parser;
use tracing::info;

use super::input::CommitArgs;
use crate::config::PipelineConfig;
use crate::extract::SpecificContext;
use crate::pipeline::{self, Draft};
use crate::rewrite::{PostLength, RewriteConstraints, Rewriter, Tone};

/// Draft command options.
#[derive(Parser)]
pub struct DraftCommand {
    /// Commit selection.
    #[command(flatten)]
    pub commits: CommitArgs,

    /// Tone of a post; repeat for several posts [default: pro, fun, concise].
    #[arg(long = "tone", value_enum, value_name = "TONE")]
    pub tones: Vec<Tone>,

    /// Target post length.
    #[arg(long, value_enum, default_value_t = PostLength::Standard)]
    pub length: PostLength,

    /// Disallows emoji in rewritten posts; templated drafts never add any.
    #[arg(long, requires = "rewrite")]
    pub no_emoji: bool,

    /// Polishes drafts with the configured LLM.
    #[arg(long)]
    pub rewrite: bool,

    /// Rewrite model, overriding COMMITCAST_MODEL.
    #[arg(long, value_name = "MODEL")]
    pub model: Option<String>,
}

impl DraftCommand {
    /// Executes the draft command.
    pub async fn execute(self) -> Result<()> {
        let mut config = PipelineConfig::load()?;
        if let Some(model) = self.model.clone() {
            config.model = model;
        }
        config.post_length = self.length;
        config.emoji = !self.no_emoji;
        if !self.tones.is_empty() {
            config.tones.clone_from(&self.tones);
        }

        let records = self.commits.load(&config).await?;
        let output = pipeline::run(&records);
        let drafts = output.drafts(&config.tones);

        let posts = if self.rewrite {
            let rewriter = Rewriter::new(Box::new(config.rewrite_client()?), config.cache_capacity);
            let constraints = RewriteConstraints {
                platform: config.platform.clone(),
                max_length: config.post_length.max_length(),
                emoji: config.emoji,
            };
            let mut posts = Vec::with_capacity(drafts.len());
            for draft in &drafts {
                let request = draft.rewrite_request(output.facts(), constraints.clone());
                posts.push(rewriter.polish(&request).await);
            }
            posts
        } else {
            drafts.iter().map(|d| d.text.clone()).collect()
        };

        info!(count = posts.len(), rewritten = self.rewrite, "Drafted posts");
        print_header(&output.feature, &output.specific_context);
        for (i, (draft, post)) in drafts.iter().zip(&posts).enumerate() {
            print_post(i + 1, draft, post);
        }
        Ok(())
    }
}

fn print_header(feature: &str, context: &SpecificContext) {
    let summary = context.summary();
    if summary.is_empty() {
        println!("Feature: {feature}");
    } else {
        println!("Feature: {feature} ({summary})");
    }
    if let Some(tech) = context.primary_tech() {
        println!("Headline tech: {tech}");
    }
    println!();
}

fn print_post(number: usize, draft: &Draft, post: &str) {
    println!("--- Post {number} ({}, {}) ---", draft.tone, draft.kind.as_str());
    println!("{post}");
    println!();
}
