//! CLI interface for commitcast.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod analyze;
pub mod draft;
pub mod input;

/// commitcast: turns recent commits into post drafts.
#[derive(Parser)]
#[command(name = "commitcast")]
#[command(about = "Turns recent commit activity into ready-to-post drafts", long_about = None)]
#[command(version)]
pub struct Cli {
    /// The main command to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Prints the signal analysis and ranked ideas as YAML.
    Analyze(analyze::AnalyzeCommand),
    /// Drafts one post per tone, optionally polished by an LLM.
    Draft(draft::DraftCommand),
}

impl Cli {
    /// Executes the CLI command.
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Analyze(cmd) => cmd.execute().await,
            Commands::Draft(cmd) => cmd.execute().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_emoji_requires_rewrite() {
        let without = Cli::try_parse_from(["commitcast", "draft", "--input", "c.json", "--no-emoji"]);
        assert!(without.is_err());

        let with = Cli::try_parse_from([
            "commitcast",
            "draft",
            "--input",
            "c.json",
            "--no-emoji",
            "--rewrite",
        ]);
        assert!(with.is_ok());
    }
}
