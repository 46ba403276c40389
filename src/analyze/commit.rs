//! Single-commit analysis and risk classification.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::extract::FileChangeSummary;
use crate::signals::{SignalCounts, SignalTag};

/// Weight above which an otherwise unremarkable commit is high risk.
pub const HIGH_RISK_WEIGHT: usize = 500;

/// Weight above which an otherwise unremarkable commit is medium risk.
pub const MEDIUM_RISK_WEIGHT: usize = 150;

/// Signals that make a commit high risk on their own.
const HIGH_RISK_SIGNALS: &[SignalTag] = &[SignalTag::NetworkingChange, SignalTag::EnvVariableChange];

/// Signals that make a commit medium risk on their own.
const MEDIUM_RISK_SIGNALS: &[SignalTag] = &[
    SignalTag::AsyncChange,
    SignalTag::ErrorHandlingChange,
    SignalTag::PromiseChange,
];

/// Signals that pin a commit to low risk before the weight rules apply.
///
/// Only `DocImageChange` is produced by the current classifiers.
const LOW_RISK_SIGNALS: &[SignalTag] = &[
    SignalTag::DocImageChange,
    SignalTag::DocTextChange,
    SignalTag::CodeFormattingChange,
    SignalTag::CommentChange,
];

/// How consequential a commit's changes likely are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    /// Touches networking or configuration, or is very large.
    HighRisk,
    /// Touches async flow or error handling, or is sizeable.
    MediumRisk,
    /// Everything else.
    LowRisk,
}

impl RiskLevel {
    /// Returns the wire name (`HIGH_RISK`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::HighRisk => "HIGH_RISK",
            Self::MediumRisk => "MEDIUM_RISK",
            Self::LowRisk => "LOW_RISK",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Totals and risk for one commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitAnalysis {
    /// Files that carried at least one signal.
    pub total_files_changed: usize,
    /// Sum of those files' weights.
    pub total_weight: usize,
    /// Number of files exhibiting each signal.
    pub signals: SignalCounts,
    /// Risk bucket.
    pub impact: RiskLevel,
}

/// Aggregates a commit's file summaries and classifies its impact.
pub fn analyze_commit(summaries: &[FileChangeSummary]) -> CommitAnalysis {
    let mut signals = SignalCounts::new();
    let mut total_weight = 0;

    for summary in summaries {
        total_weight += summary.weight;
        for &tag in &summary.signals {
            signals.add(tag, 1);
        }
    }

    let impact = classify_impact(&signals, total_weight);
    CommitAnalysis {
        total_files_changed: summaries.len(),
        total_weight,
        signals,
        impact,
    }
}

/// Decides the risk bucket; the first matching rule wins.
pub fn classify_impact(signals: &SignalCounts, total_weight: usize) -> RiskLevel {
    if signals.any(HIGH_RISK_SIGNALS) {
        return RiskLevel::HighRisk;
    }
    if signals.any(MEDIUM_RISK_SIGNALS) {
        return RiskLevel::MediumRisk;
    }
    if signals.any(LOW_RISK_SIGNALS) {
        return RiskLevel::LowRisk;
    }
    if total_weight > HIGH_RISK_WEIGHT {
        return RiskLevel::HighRisk;
    }
    if total_weight > MEDIUM_RISK_WEIGHT {
        return RiskLevel::MediumRisk;
    }
    RiskLevel::LowRisk
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn summary(path: &str, weight: usize, tags: &[SignalTag]) -> FileChangeSummary {
        FileChangeSummary {
            path: path.to_string(),
            status: "modified".to_string(),
            signals: tags.iter().copied().collect::<BTreeSet<_>>(),
            weight,
        }
    }

    fn counts(tags: &[(SignalTag, usize)]) -> SignalCounts {
        tags.iter().copied().collect()
    }

    #[test]
    fn counts_files_per_signal_and_sums_weight() {
        let analysis = analyze_commit(&[
            summary("a.js", 10, &[SignalTag::AsyncChange, SignalTag::FunctionChange]),
            summary("b.js", 5, &[SignalTag::AsyncChange]),
        ]);
        assert_eq!(analysis.total_files_changed, 2);
        assert_eq!(analysis.total_weight, 15);
        assert_eq!(analysis.signals.count(SignalTag::AsyncChange), 2);
        assert_eq!(analysis.signals.count(SignalTag::FunctionChange), 1);
        assert_eq!(analysis.impact, RiskLevel::MediumRisk);
    }

    #[test]
    fn login_handler_is_high_risk() {
        let analysis = analyze_commit(&[summary(
            "auth.js",
            12,
            &[
                SignalTag::AsyncChange,
                SignalTag::ErrorHandlingChange,
                SignalTag::NetworkingChange,
                SignalTag::FunctionChange,
            ],
        )]);
        assert_eq!(analysis.impact, RiskLevel::HighRisk);
    }

    #[test]
    fn networking_beats_weight_fallback() {
        let signals = counts(&[(SignalTag::NetworkingChange, 1)]);
        assert_eq!(classify_impact(&signals, 10), RiskLevel::HighRisk);
    }

    #[test]
    fn env_change_is_high_risk() {
        let signals = counts(&[(SignalTag::EnvVariableChange, 1)]);
        assert_eq!(classify_impact(&signals, 0), RiskLevel::HighRisk);
    }

    #[test]
    fn async_rule_precedes_weight_rules() {
        let signals = counts(&[(SignalTag::PromiseChange, 1)]);
        assert_eq!(classify_impact(&signals, 10_000), RiskLevel::MediumRisk);
    }

    #[test]
    fn doc_image_pins_low_risk_even_when_large() {
        let signals = counts(&[(SignalTag::DocImageChange, 1)]);
        assert_eq!(classify_impact(&signals, 900), RiskLevel::LowRisk);
    }

    #[test]
    fn unreachable_low_risk_tags_still_pin_low_risk() {
        // No classifier emits these tags; the rule table keeps them anyway.
        for tag in [
            SignalTag::DocTextChange,
            SignalTag::CodeFormattingChange,
            SignalTag::CommentChange,
        ] {
            assert_eq!(classify_impact(&counts(&[(tag, 1)]), 900), RiskLevel::LowRisk);
        }
    }

    #[test]
    fn weight_thresholds_are_strict() {
        let none = SignalCounts::new();
        assert_eq!(classify_impact(&none, 501), RiskLevel::HighRisk);
        assert_eq!(classify_impact(&none, 500), RiskLevel::MediumRisk);
        assert_eq!(classify_impact(&none, 151), RiskLevel::MediumRisk);
        assert_eq!(classify_impact(&none, 150), RiskLevel::LowRisk);
    }

    #[test]
    fn doc_only_commit_falls_through_to_weight() {
        let signals = counts(&[(SignalTag::DocHeadingChange, 1)]);
        assert_eq!(classify_impact(&signals, 600), RiskLevel::HighRisk);
        assert_eq!(classify_impact(&signals, 3), RiskLevel::LowRisk);
    }

    #[test]
    fn empty_commit_is_low_risk() {
        let analysis = analyze_commit(&[]);
        assert_eq!(analysis.total_files_changed, 0);
        assert_eq!(analysis.total_weight, 0);
        assert!(analysis.signals.is_empty());
        assert_eq!(analysis.impact, RiskLevel::LowRisk);
    }

    #[test]
    fn risk_level_serializes_to_screaming_case() {
        assert_eq!(serde_json::to_string(&RiskLevel::MediumRisk).unwrap(), "\"MEDIUM_RISK\"");
        assert_eq!(RiskLevel::LowRisk.to_string(), "LOW_RISK");
    }
}
