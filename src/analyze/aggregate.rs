//! Folding many commit analyses into one aggregate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::commit::{analyze_commit, CommitAnalysis, RiskLevel};
use super::feature::extract_feature;
use crate::data::{ChangedFile, CommitRecord};
use crate::extract::extract_commit_signals;
use crate::signals::SignalCounts;

/// Number of commits in each risk bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactCounts {
    /// Commits classified high risk.
    #[serde(rename = "HIGH_RISK")]
    pub high_risk: usize,
    /// Commits classified medium risk.
    #[serde(rename = "MEDIUM_RISK")]
    pub medium_risk: usize,
    /// Commits classified low risk.
    #[serde(rename = "LOW_RISK")]
    pub low_risk: usize,
}

impl ImpactCounts {
    /// Counts one commit in `level`'s bucket.
    pub fn record(&mut self, level: RiskLevel) {
        match level {
            RiskLevel::HighRisk => self.high_risk += 1,
            RiskLevel::MediumRisk => self.medium_risk += 1,
            RiskLevel::LowRisk => self.low_risk += 1,
        }
    }

    /// Returns the count for `level`.
    pub fn get(&self, level: RiskLevel) -> usize {
        match level {
            RiskLevel::HighRisk => self.high_risk,
            RiskLevel::MediumRisk => self.medium_risk,
            RiskLevel::LowRisk => self.low_risk,
        }
    }
}

/// A commit's analysis with its original metadata attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzedCommit {
    /// Full commit SHA.
    pub sha: String,
    /// Full commit message.
    pub message: String,
    /// Author name.
    pub author: String,
    /// Authoring timestamp.
    pub date: Option<DateTime<Utc>>,
    /// All files the commit touched, classified or not.
    pub files: Vec<ChangedFile>,
    /// Source repository.
    pub repo: Option<String>,
    /// Totals and risk.
    #[serde(flatten)]
    pub analysis: CommitAnalysis,
}

impl AnalyzedCommit {
    /// Pairs a commit record with its analysis.
    pub fn from_record(record: &CommitRecord, analysis: CommitAnalysis) -> Self {
        Self {
            sha: record.sha.clone(),
            message: record.message.clone(),
            author: record.author.name.clone(),
            date: record.author.date,
            files: record.files.clone(),
            repo: record.repo.clone(),
            analysis,
        }
    }

    /// Returns the first line of the commit message.
    pub fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}

/// Batch-level totals over many commits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateAnalysis {
    /// Commits folded in.
    pub total_commits: usize,
    /// Sum of per-commit files with signals.
    pub total_files_changed: usize,
    /// Sum of per-commit weights.
    pub total_weight: usize,
    /// Summed signal counts.
    pub signals: SignalCounts,
    /// Commits per risk bucket.
    pub impacts: ImpactCounts,
    /// Input commits in input order.
    pub commits: Vec<AnalyzedCommit>,
}

impl AggregateAnalysis {
    /// Distinct repositories in first-seen order.
    pub fn repos(&self) -> Vec<String> {
        let mut repos: Vec<String> = Vec::new();
        for repo in self.commits.iter().filter_map(|c| c.repo.as_ref()) {
            if !repos.contains(repo) {
                repos.push(repo.clone());
            }
        }
        repos
    }

    /// Guesses the feature label from the aggregated commit messages.
    pub fn feature(&self) -> String {
        extract_feature(self.commits.iter().map(|c| c.message.as_str()))
    }
}

/// Extracts and analyses every commit in a batch.
pub fn analyze_commits(records: &[CommitRecord]) -> Vec<AnalyzedCommit> {
    records
        .iter()
        .map(|record| {
            let summaries = extract_commit_signals(record);
            let analysis = analyze_commit(&summaries);
            debug!(
                sha = %record.sha,
                files = analysis.total_files_changed,
                weight = analysis.total_weight,
                impact = %analysis.impact,
                "Analyzed commit"
            );
            AnalyzedCommit::from_record(record, analysis)
        })
        .collect()
}

/// Folds per-commit analyses into batch totals.
///
/// Every numeric field is independent of input order; `commits` keeps it.
pub fn aggregate(commits: Vec<AnalyzedCommit>) -> AggregateAnalysis {
    let mut aggregated = AggregateAnalysis {
        total_commits: commits.len(),
        ..AggregateAnalysis::default()
    };

    for commit in &commits {
        aggregated.total_files_changed += commit.analysis.total_files_changed;
        aggregated.total_weight += commit.analysis.total_weight;
        aggregated.impacts.record(commit.analysis.impact);
        aggregated.signals.merge(&commit.analysis.signals);
    }

    aggregated.commits = commits;
    aggregated
}
