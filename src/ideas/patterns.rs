//! Heuristics over a batch of commits that feed idea details.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::analyze::AnalyzedCommit;
use crate::signals::{SignalCounts, SignalTag};

/// Words ignored when looking for a recurring theme in commit subjects.
const COMMON_WORDS: &[&str] = &[
    "the", "and", "for", "add", "update", "fix", "with", "from", "this", "that",
];

/// How the commits were spread over the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TimeSpan {
    /// No dated commits.
    #[serde(rename = "unknown")]
    Unknown,
    /// Under two hours between first and last commit.
    #[serde(rename = "concentrated burst")]
    ConcentratedBurst,
    /// Under six hours.
    #[serde(rename = "morning/afternoon")]
    MorningAfternoon,
    /// Six hours or more.
    #[serde(rename = "full day")]
    FullDay,
}

impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unknown => "unknown",
            Self::ConcentratedBurst => "concentrated burst",
            Self::MorningAfternoon => "morning/afternoon",
            Self::FullDay => "full day",
        })
    }
}

/// Rough shape of the day's commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WorkPattern {
    /// Many small commits.
    #[serde(rename = "iterative")]
    Iterative,
    /// A few large commits.
    #[serde(rename = "big changes")]
    BigChanges,
    /// Anything in between.
    #[serde(rename = "steady progress")]
    SteadyProgress,
}

/// Breadth of a refactor measured in distinct signal kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RefactorScope {
    /// More than six kinds of change.
    WideRanging,
    /// Four to six kinds.
    Targeted,
    /// Three or fewer.
    Focused,
}

/// Recurring vocabulary in commit subjects.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitPatterns {
    /// Most frequent meaningful subject word.
    pub theme: Option<String>,
    /// Theme occurrences per commit.
    pub consistency: f64,
    /// Subjects that mention `fix` or `update`.
    pub iterations: usize,
}

/// Finds the recurring theme in commit subject lines.
///
/// Subjects are lower-cased and split on whitespace. Ties go to the word
/// seen first.
pub fn analyze_commit_patterns(commits: &[AnalyzedCommit]) -> CommitPatterns {
    let subjects: Vec<String> = commits.iter().map(|c| c.subject().to_lowercase()).collect();

    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for word in subjects.iter().flat_map(|s| s.split_whitespace()) {
        if word.chars().count() <= 3 || COMMON_WORDS.contains(&word) {
            continue;
        }
        let count = counts.entry(word).or_insert(0);
        if *count == 0 {
            order.push(word);
        }
        *count += 1;
    }

    let mut top: Option<(&str, usize)> = None;
    for word in order {
        let count = counts[word];
        if top.map_or(true, |(_, best)| count > best) {
            top = Some((word, count));
        }
    }

    let iterations = subjects
        .iter()
        .filter(|s| s.contains("fix") || s.contains("update"))
        .count();

    #[allow(clippy::cast_precision_loss)]
    let consistency = match top {
        Some((_, count)) if !commits.is_empty() => count as f64 / commits.len() as f64,
        _ => 0.0,
    };

    CommitPatterns {
        theme: top.map(|(word, _)| word.to_string()),
        consistency,
        iterations,
    }
}

/// Buckets the time between the earliest and latest dated commit.
pub fn calculate_time_span(commits: &[AnalyzedCommit]) -> TimeSpan {
    let dates = commits.iter().filter_map(|c| c.date);
    let (Some(first), Some(last)) = (dates.clone().min(), dates.max()) else {
        return TimeSpan::Unknown;
    };

    let seconds = (last - first).num_seconds();
    if seconds < 2 * 3600 {
        TimeSpan::ConcentratedBurst
    } else if seconds < 6 * 3600 {
        TimeSpan::MorningAfternoon
    } else {
        TimeSpan::FullDay
    }
}

/// Classifies the batch as iterative, big-bang or steady.
pub fn detect_work_pattern(total_weight: usize, total_commits: usize) -> WorkPattern {
    if total_commits > 15 && total_weight < 300 {
        WorkPattern::Iterative
    } else if total_commits < 5 && total_weight > 500 {
        WorkPattern::BigChanges
    } else {
        WorkPattern::SteadyProgress
    }
}

/// Hints in full commit messages that the work involved trial and error.
pub fn detect_learning_indicators(commits: &[AnalyzedCommit]) -> Vec<String> {
    let messages: Vec<String> = commits.iter().map(|c| c.message.to_lowercase()).collect();
    let mut indicators = Vec::new();
    if messages.iter().any(|m| m.contains("fix") || m.contains("correct")) {
        indicators.push("iterative fixes".to_string());
    }
    if messages.iter().any(|m| m.contains("refactor") || m.contains("improve")) {
        indicators.push("improvements".to_string());
    }
    indicators
}

/// Distinct markdown files touched, in first-seen order.
pub fn doc_files_updated(commits: &[AnalyzedCommit]) -> Vec<String> {
    let mut files: Vec<String> = Vec::new();
    for file in commits.iter().flat_map(|c| &c.files) {
        if file.filename.ends_with(".md") && !files.contains(&file.filename) {
            files.push(file.filename.clone());
        }
    }
    files
}

/// Kinds of documentation work present in the signals.
pub fn doc_types(signals: &SignalCounts) -> Vec<String> {
    [
        (SignalTag::DocImageChange, "images"),
        (SignalTag::DocHeadingChange, "structure"),
        (SignalTag::DocLinkChange, "links"),
    ]
    .into_iter()
    .filter(|(tag, _)| signals.contains(*tag))
    .map(|(_, label)| label.to_string())
    .collect()
}

/// Risky areas touched by the batch.
pub fn risk_factors(signals: &SignalCounts) -> Vec<String> {
    [
        (SignalTag::NetworkingChange, "API changes"),
        (SignalTag::EnvVariableChange, "env config"),
        (SignalTag::AsyncChange, "async flow"),
    ]
    .into_iter()
    .filter(|(tag, _)| signals.contains(*tag))
    .map(|(_, label)| label.to_string())
    .collect()
}

/// Protective changes that accompanied risky ones.
pub fn detect_safeguards(signals: &SignalCounts) -> Vec<String> {
    [
        (SignalTag::ErrorHandlingChange, "error handling"),
        (SignalTag::TestChange, "tests"),
    ]
    .into_iter()
    .filter(|(tag, _)| signals.contains(*tag))
    .map(|(_, label)| label.to_string())
    .collect()
}

/// Infrastructure challenges implied by the signals.
pub fn infrastructure_challenges(signals: &SignalCounts) -> Vec<String> {
    [
        (SignalTag::NetworkingChange, "API integration"),
        (SignalTag::EnvVariableChange, "configuration"),
    ]
    .into_iter()
    .filter(|(tag, _)| signals.contains(*tag))
    .map(|(_, label)| label.to_string())
    .collect()
}

/// Likely motivations behind a large refactor.
pub fn detect_refactor_reasons(signals: &SignalCounts) -> Vec<String> {
    let mut reasons = Vec::new();
    if signals.count(SignalTag::FunctionChange) > 5 {
        reasons.push("function organization".to_string());
    }
    if signals.count(SignalTag::ImportChange) > 3 {
        reasons.push("dependency cleanup".to_string());
    }
    if signals.count(SignalTag::ClassChange) > 2 {
        reasons.push("class structure".to_string());
    }
    reasons
}

/// Buckets refactor breadth by the number of distinct signals.
pub fn categorize_refactor_scope(signals: &SignalCounts) -> RefactorScope {
    match signals.distinct() {
        n if n > 6 => RefactorScope::WideRanging,
        n if n > 3 => RefactorScope::Targeted,
        _ => RefactorScope::Focused,
    }
}

/// Kinds of tests touched, judged from file paths.
pub fn detect_test_types(commits: &[AnalyzedCommit]) -> Vec<String> {
    let paths: Vec<String> = commits
        .iter()
        .flat_map(|c| &c.files)
        .map(|f| f.filename.to_lowercase())
        .collect();

    let mut types = Vec::new();
    if paths.iter().any(|p| p.contains("e2e") || p.contains("cypress") || p.contains("playwright")) {
        types.push("end-to-end tests".to_string());
    }
    if paths.iter().any(|p| p.contains("integration")) {
        types.push("integration tests".to_string());
    }
    if types.is_empty() || paths.iter().any(|p| p.contains(".test.") || p.contains(".spec.")) {
        types.insert(0, "unit tests".to_string());
    }
    types
}

/// Parts of the stack the day's work touched.
pub fn categorize_day_areas(commits: &[AnalyzedCommit], signals: &SignalCounts) -> Vec<String> {
    let mut areas = Vec::new();
    let frontend = commits.iter().flat_map(|c| &c.files).any(|f| {
        let name = f.filename.to_lowercase();
        [".jsx", ".tsx", ".vue", ".css", ".scss"]
            .iter()
            .any(|ext| name.ends_with(ext))
    });
    if frontend {
        areas.push("frontend".to_string());
    }
    if signals.contains(SignalTag::NetworkingChange) {
        areas.push("API layer".to_string());
    }
    if signals.contains(SignalTag::TestChange) {
        areas.push("testing".to_string());
    }
    if signals.any(&[SignalTag::DocImageChange, SignalTag::DocHeadingChange]) {
        areas.push("documentation".to_string());
    }
    areas
}
