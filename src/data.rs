//! Commit records and report data structures.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analyze::{AggregateAnalysis, ImpactCounts};
use crate::extract::SpecificContext;
use crate::ideas::Idea;
use crate::signals::SignalCounts;

/// Author of a commit as reported by the data source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitAuthor {
    /// Display name of the author.
    pub name: String,
    /// Authoring timestamp.
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

/// One file touched by a commit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangedFile {
    /// Path of the file relative to the repository root.
    pub filename: String,
    /// Change status (added, modified, removed, renamed, ...).
    pub status: String,
    /// Lines added.
    #[serde(default)]
    pub additions: usize,
    /// Lines removed.
    #[serde(default)]
    pub deletions: usize,
    /// Unified diff text; absent for binary or rename-only changes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<String>,
}

impl ChangedFile {
    /// Returns `additions + deletions`.
    pub fn weight(&self) -> usize {
        self.additions + self.deletions
    }
}

/// A commit with its changed files, independent of where it was fetched from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// Full commit SHA.
    pub sha: String,
    /// Full commit message.
    pub message: String,
    /// Commit author.
    pub author: CommitAuthor,
    /// Files changed by the commit.
    #[serde(default)]
    pub files: Vec<ChangedFile>,
    /// Repository the commit was fetched from, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
}

impl CommitRecord {
    /// Returns the first line of the commit message.
    pub fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}

/// Headline numbers of an aggregate analysis.
#[derive(Debug, Clone, Serialize)]
pub struct ReportStats {
    /// Commits analysed.
    pub total_commits: usize,
    /// Files that carried at least one signal.
    pub total_files_changed: usize,
    /// Sum of additions and deletions over those files.
    pub total_weight: usize,
    /// Signal occurrences across all commits.
    pub signals: SignalCounts,
    /// Commits per risk bucket.
    pub impacts: ImpactCounts,
    /// Repositories that contributed commits.
    pub repos: Vec<String>,
}

/// Full analysis report printed by `commitcast analyze`.
#[derive(Debug, Clone, Serialize)]
pub struct PulseReport {
    /// Crate version that produced the report.
    pub version: String,
    /// Headline numbers.
    pub stats: ReportStats,
    /// Best guess at what was built.
    pub feature: String,
    /// Concrete libraries, functions, modules and keywords.
    pub specific_context: SpecificContext,
    /// Ranked post ideas.
    pub ideas: Vec<Idea>,
}

impl PulseReport {
    /// Builds a report from the pipeline outputs.
    pub fn new(
        aggregate: &AggregateAnalysis,
        feature: String,
        specific_context: SpecificContext,
        ideas: Vec<Idea>,
    ) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            stats: ReportStats {
                total_commits: aggregate.total_commits,
                total_files_changed: aggregate.total_files_changed,
                total_weight: aggregate.total_weight,
                signals: aggregate.signals.clone(),
                impacts: aggregate.impacts,
                repos: aggregate.repos(),
            },
            feature,
            specific_context,
            ideas,
        }
    }
}

/// Serializes a data structure to a YAML string.
pub fn to_yaml<T: Serialize>(data: &T) -> Result<String> {
    serde_yaml::to_string(data).context("Failed to serialize to YAML")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn commit_record_deserializes_with_defaults() {
        let json = r#"{
            "sha": "abc123",
            "message": "feat: add login\n\nlong body",
            "author": { "name": "Dev" },
            "files": [{ "filename": "src/auth.js", "status": "modified" }]
        }"#;
        let record: CommitRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.subject(), "feat: add login");
        assert_eq!(record.author.date, None);
        assert_eq!(record.files[0].weight(), 0);
        assert!(record.files[0].patch.is_none());
        assert!(record.repo.is_none());
    }

    #[test]
    fn changed_file_weight_sums_both_sides() {
        let file = ChangedFile {
            filename: "a.ts".to_string(),
            status: "modified".to_string(),
            additions: 7,
            deletions: 5,
            patch: None,
        };
        assert_eq!(file.weight(), 12);
    }

    #[test]
    fn to_yaml_renders_mapping() {
        let author = CommitAuthor {
            name: "Dev".to_string(),
            date: None,
        };
        let yaml = to_yaml(&author).unwrap();
        assert!(yaml.contains("name: Dev"));
    }
}
