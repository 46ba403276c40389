//! `commitcast analyze`.

use anyhow::Result;
use clap::Parser;

use super::input::CommitArgs;
use crate::config::PipelineConfig;
use crate::data::to_yaml;
use crate::pipeline;

/// Analyze command options.
#[derive(Parser)]
pub struct AnalyzeCommand {
    /// Commit selection.
    #[command(flatten)]
    pub commits: CommitArgs,
}

impl AnalyzeCommand {
    /// Executes the analyze command.
    pub async fn execute(self) -> Result<()> {
        let config = PipelineConfig::load()?;
        let records = self.commits.load(&config).await?;
        let output = pipeline::run(&records);
        let yaml = to_yaml(&output.report())?;
        println!("{yaml}");
        Ok(())
    }
}
