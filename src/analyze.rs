//! Commit analysis: per-commit totals, risk, aggregation and feature labels.

pub mod aggregate;
pub mod commit;
pub mod feature;

pub use aggregate::{aggregate, analyze_commits, AggregateAnalysis, AnalyzedCommit, ImpactCounts};
pub use commit::{analyze_commit, classify_impact, CommitAnalysis, RiskLevel};
pub use feature::{extract_feature, FALLBACK_FEATURE};

