//! Commit selection flags shared by all commands.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use tracing::info;

use crate::config::PipelineConfig;
use crate::data::CommitRecord;
use crate::source::load_commits;

/// Where to read commits from.
#[derive(Args, Debug, Clone)]
pub struct CommitArgs {
    /// JSON file of commit records or GitHub commit details.
    #[arg(long, value_name = "FILE", conflicts_with = "repos", required_unless_present = "repos")]
    pub input: Option<PathBuf>,

    /// GitHub repository to fetch the last 24 hours of commits from.
    ///
    /// Repeat to analyse several repositories together.
    #[arg(long = "repo", value_name = "OWNER/NAME")]
    pub repos: Vec<String>,

    /// Only include commits by this GitHub user.
    #[arg(long, value_name = "USER", requires = "repos")]
    pub author: Option<String>,
}

impl CommitArgs {
    /// Loads the selected commits, failing when there are none.
    pub async fn load(&self, config: &PipelineConfig) -> Result<Vec<CommitRecord>> {
        let commits = match &self.input {
            Some(path) => load_commits(path)?,
            None if self.repos.is_empty() => bail!("Either --input or --repo is required"),
            None => {
                config
                    .github_client()
                    .fetch_recent_commits_across(&self.repos, self.author.as_deref())
                    .await?
            }
        };

        if commits.is_empty() {
            bail!("No commits found in the last 24 hours");
        }
        info!(count = commits.len(), "Loaded commits");
        Ok(commits)
    }
}
