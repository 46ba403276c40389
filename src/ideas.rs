//! Post idea generation and ranking.
//!
//! A fixed battery of heuristics inspects an [`AggregateAnalysis`] and emits
//! scored ideas. The daily summary always fires, so the result is never empty.

pub mod patterns;

use serde::Serialize;
use tracing::debug;

use crate::analyze::AggregateAnalysis;
use crate::signals::{SignalCounts, SignalTag};

pub use patterns::{CommitPatterns, RefactorScope, TimeSpan, WorkPattern};

/// Share of all signal occurrences, in percent, a signal must exceed to dominate.
const DOMINANT_SHARE_PERCENT: usize = 40;

/// Count any of the async-related signals must exceed for a learning story.
const LEARNING_THRESHOLD: usize = 3;

/// Test signal count that must be exceeded for a testing story.
const TESTING_THRESHOLD: usize = 2;

/// Distinct signal kinds needed for a variety story.
const VARIETY_MIN_KINDS: usize = 5;

/// Weight and commit count a refactor story must exceed.
const REFACTOR_MIN_WEIGHT: usize = 500;
const REFACTOR_MIN_COMMITS: usize = 5;

/// Broad category of a post idea.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IdeaKind {
    /// One signal dominated the day.
    FocusedTechnical,
    /// Lots of async and error handling.
    Learning,
    /// Documentation work.
    BuildInPublic,
    /// Risky or infrastructure changes.
    TechnicalDecision,
    /// A large refactor.
    EngineeringPractice,
    /// Test work.
    Quality,
    /// Many kinds of change.
    Variety,
    /// Fallback overview of the day.
    DailySummary,
    /// A recurring theme in commit subjects.
    FocusedEffort,
}

impl IdeaKind {
    /// Returns the snake_case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FocusedTechnical => "focused_technical",
            Self::Learning => "learning",
            Self::BuildInPublic => "build_in_public",
            Self::TechnicalDecision => "technical_decision",
            Self::EngineeringPractice => "engineering_practice",
            Self::Quality => "quality",
            Self::Variety => "variety",
            Self::DailySummary => "daily_summary",
            Self::FocusedEffort => "focused_effort",
        }
    }
}

/// Per-kind facts backing an idea.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum IdeaDetails {
    /// Facts for [`IdeaKind::FocusedTechnical`].
    Focused {
        /// The dominant signal.
        signal: SignalTag,
        /// Its occurrence count.
        count: usize,
        /// Its rounded share of all occurrences.
        percentage: u32,
        /// Commits in which it appeared.
        commits_touched: usize,
        /// Overall shape of the work.
        pattern: WorkPattern,
    },
    /// Facts for [`IdeaKind::Learning`].
    Learning {
        /// `async_change` occurrences.
        async_changes: usize,
        /// `error_handling_change` occurrences.
        error_handling: usize,
        /// `promise_change` occurrences.
        promise_changes: usize,
        /// Subjects mentioning fixes or updates.
        iterations: usize,
        /// Trial-and-error hints from commit messages.
        learning_indicators: Vec<String>,
    },
    /// Facts for the documentation story.
    Documentation {
        /// Sum of the doc story signals.
        doc_changes: usize,
        /// Kinds of doc work.
        types: Vec<String>,
        /// Markdown files touched.
        files_updated: Vec<String>,
    },
    /// Facts for the risk management story.
    Risk {
        /// Commits classified high risk.
        high_risk_commits: usize,
        /// Risky areas touched.
        risk_factors: Vec<String>,
        /// Protective changes alongside.
        safeguards: Vec<String>,
    },
    /// Facts for the refactor story.
    Refactor {
        /// Total weight.
        lines_changed: usize,
        /// Commit count.
        commits: usize,
        /// Likely motivations.
        reasons: Vec<String>,
        /// Breadth.
        scope: RefactorScope,
    },
    /// Facts for the testing story.
    Testing {
        /// `test_change` occurrences.
        test_changes: usize,
        /// Kinds of tests touched.
        test_types: Vec<String>,
    },
    /// Facts for the full-stack story.
    FullStack {
        /// Distinct signal kinds.
        signal_types: usize,
        /// Stack areas touched.
        areas: Vec<String>,
    },
    /// Facts for the infrastructure story.
    Infrastructure {
        /// Infrastructure areas touched.
        challenges: Vec<String>,
    },
    /// Facts for the daily summary.
    Daily {
        /// Commit count.
        commits: usize,
        /// Files with signals.
        files_changed: usize,
        /// Total weight.
        total_weight: usize,
        /// Spread of commit times.
        time_span: TimeSpan,
        /// Recurring subject word, or `mixed work`.
        theme: String,
    },
    /// Facts for the thematic story.
    Thematic {
        /// Recurring subject word.
        theme: String,
        /// Commit count.
        commits: usize,
        /// Theme occurrences per commit.
        consistency: f64,
    },
}

/// A candidate narrative angle for a post.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Idea {
    /// Category.
    pub kind: IdeaKind,
    /// Narrower angle within the category.
    pub angle: String,
    /// Short headline.
    pub title: String,
    /// One-sentence pitch.
    pub description: String,
    /// Ranking score; higher is better.
    pub relevance_score: u32,
    /// Typed facts backing the idea.
    pub details: IdeaDetails,
    /// Personalised opening lines.
    pub hooks: Vec<String>,
}

impl Idea {
    fn new(
        kind: IdeaKind,
        angle: impl Into<String>,
        title: impl Into<String>,
        description: &str,
        relevance_score: u32,
        details: IdeaDetails,
        hooks: Vec<String>,
    ) -> Self {
        Self {
            kind,
            angle: angle.into(),
            title: title.into(),
            description: description.to_string(),
            relevance_score,
            details,
            hooks,
        }
    }
}

/// Runs every idea heuristic and returns the ideas ranked by score.
///
/// Ideas with equal scores keep their generation order.
pub fn generate_ideas(analysis: &AggregateAnalysis) -> Vec<Idea> {
    let signals = &analysis.signals;
    let commit_patterns = patterns::analyze_commit_patterns(&analysis.commits);
    let time_span = patterns::calculate_time_span(&analysis.commits);
    let work_pattern = patterns::detect_work_pattern(analysis.total_weight, analysis.total_commits);

    let mut ideas = Vec::new();

    if let Some((tag, count)) = dominant_signal(signals) {
        ideas.push(focused_work_idea(analysis, tag, count, work_pattern));
    }

    if [
        SignalTag::AsyncChange,
        SignalTag::ErrorHandlingChange,
        SignalTag::PromiseChange,
    ]
    .iter()
    .any(|tag| signals.count(*tag) > LEARNING_THRESHOLD)
    {
        ideas.push(learning_journey_idea(analysis, &commit_patterns));
    }

    let doc_changes: usize = SignalTag::DOC_STORY.iter().map(|tag| signals.count(*tag)).sum();
    if doc_changes > 0 {
        ideas.push(documentation_idea(analysis, doc_changes));
    }

    if analysis.impacts.high_risk > 0 {
        ideas.push(risk_management_idea(analysis));
    }

    if analysis.total_weight > REFACTOR_MIN_WEIGHT && analysis.total_commits > REFACTOR_MIN_COMMITS {
        ideas.push(refactor_idea(analysis));
    }

    let test_changes = signals.count(SignalTag::TestChange);
    if test_changes > TESTING_THRESHOLD {
        ideas.push(testing_idea(analysis, test_changes));
    }

    if signals.distinct() >= VARIETY_MIN_KINDS {
        ideas.push(full_stack_idea(analysis));
    }

    if signals.any(&[SignalTag::NetworkingChange, SignalTag::EnvVariableChange]) {
        ideas.push(infrastructure_idea(signals));
    }

    ideas.push(daily_summary_idea(analysis, &commit_patterns, time_span));

    if let Some(theme) = commit_patterns.theme.as_deref() {
        ideas.push(thematic_idea(analysis, theme, commit_patterns.consistency));
    }

    // Stable, so equal scores keep generation order.
    ideas.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));

    debug!(
        count = ideas.len(),
        top = ?ideas.first().map(|idea| idea.kind),
        "Generated post ideas"
    );
    ideas
}

/// Returns the most frequent signal when it holds strictly more than 40% of
/// all occurrences.
pub fn dominant_signal(signals: &SignalCounts) -> Option<(SignalTag, usize)> {
    let total = signals.total();
    if total == 0 {
        return None;
    }
    signals
        .dominant()
        .filter(|(_, count)| 100 * count > DOMINANT_SHARE_PERCENT * total)
}

/// Rounds `count / total` to a whole percentage, halves rounding up.
fn rounded_percentage(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let percent = (200 * count + total) / (2 * total);
    u32::try_from(percent).unwrap_or(u32::MAX)
}

/// Share shown for a dominant signal; never reads as the non-dominant 40%.
fn dominant_percentage(count: usize, total: usize) -> u32 {
    let floor = u32::try_from(DOMINANT_SHARE_PERCENT + 1).unwrap_or(u32::MAX);
    rounded_percentage(count, total).max(floor)
}

fn focused_work_idea(
    analysis: &AggregateAnalysis,
    tag: SignalTag,
    count: usize,
    pattern: WorkPattern,
) -> Idea {
    let readable = tag.readable();
    let percentage = dominant_percentage(count, analysis.signals.total());
    let commits_touched = analysis
        .commits
        .iter()
        .filter(|c| c.analysis.signals.contains(tag))
        .count();

    Idea::new(
        IdeaKind::FocusedTechnical,
        tag.as_str(),
        format!("Deep Work: {readable}"),
        "A day spent focusing on one specific technical area",
        percentage,
        IdeaDetails::Focused {
            signal: tag,
            count,
            percentage,
            commits_touched,
            pattern,
        },
        vec![
            format!("{count} instances of {readable} today"),
            format!("Spent the day deep in {readable}"),
            format!("{readable} everywhere I looked today"),
        ],
    )
}

fn learning_journey_idea(analysis: &AggregateAnalysis, commit_patterns: &CommitPatterns) -> Idea {
    let signals = &analysis.signals;
    Idea::new(
        IdeaKind::Learning,
        "async_complexity",
        "Learning in Public: Async Challenges",
        "Share the real learning experience with async patterns",
        80,
        IdeaDetails::Learning {
            async_changes: signals.count(SignalTag::AsyncChange),
            error_handling: signals.count(SignalTag::ErrorHandlingChange),
            promise_changes: signals.count(SignalTag::PromiseChange),
            iterations: commit_patterns.iterations,
            learning_indicators: patterns::detect_learning_indicators(&analysis.commits),
        },
        vec![
            "Hit some async complexity today that made me think".to_string(),
            "Async JavaScript still has surprises for me".to_string(),
            "Learning curve day with promises and async/await".to_string(),
        ],
    )
}

fn documentation_idea(analysis: &AggregateAnalysis, doc_changes: usize) -> Idea {
    Idea::new(
        IdeaKind::BuildInPublic,
        "documentation",
        "Documentation Day: Making it Better",
        "The often overlooked but crucial work of good docs",
        70,
        IdeaDetails::Documentation {
            doc_changes,
            types: patterns::doc_types(&analysis.signals),
            files_updated: patterns::doc_files_updated(&analysis.commits),
        },
        vec![
            "Took a break from features to focus on docs".to_string(),
            "Documentation day - not glamorous, but necessary".to_string(),
            "Making sure the docs actually reflect reality".to_string(),
        ],
    )
}

fn risk_management_idea(analysis: &AggregateAnalysis) -> Idea {
    Idea::new(
        IdeaKind::TechnicalDecision,
        "risk_management",
        "Careful Engineering: Managing Risk",
        "Decisions that required extra thought and testing",
        90,
        IdeaDetails::Risk {
            high_risk_commits: analysis.impacts.high_risk,
            risk_factors: patterns::risk_factors(&analysis.signals),
            safeguards: patterns::detect_safeguards(&analysis.signals),
        },
        vec![
            "Made some changes today that needed extra care".to_string(),
            "Not the kind of commits you make without thinking twice".to_string(),
            "Engineering decisions that matter in production".to_string(),
        ],
    )
}

fn refactor_idea(analysis: &AggregateAnalysis) -> Idea {
    let weight = analysis.total_weight;
    Idea::new(
        IdeaKind::EngineeringPractice,
        "refactoring",
        format!("Big Refactor: {weight} Lines Changed"),
        "The story of cleaning up technical debt",
        85,
        IdeaDetails::Refactor {
            lines_changed: weight,
            commits: analysis.total_commits,
            reasons: patterns::detect_refactor_reasons(&analysis.signals),
            scope: patterns::categorize_refactor_scope(&analysis.signals),
        },
        vec![
            format!("{weight} lines changed. Started small, ended up refactoring everything"),
            "One of those refactors that keeps growing".to_string(),
            "Sometimes you need to tear things down to build them better".to_string(),
        ],
    )
}

fn testing_idea(analysis: &AggregateAnalysis, test_changes: usize) -> Idea {
    Idea::new(
        IdeaKind::Quality,
        "testing",
        "Testing Day: Building Confidence",
        "The unglamorous work that prevents future headaches",
        75,
        IdeaDetails::Testing {
            test_changes,
            test_types: patterns::detect_test_types(&analysis.commits),
        },
        vec![
            "Testing day. Not exciting, but necessary".to_string(),
            "Adding the safety net before changing things".to_string(),
            "Future me will thank present me for writing these tests".to_string(),
        ],
    )
}

fn full_stack_idea(analysis: &AggregateAnalysis) -> Idea {
    let signal_types = analysis.signals.distinct();
    Idea::new(
        IdeaKind::Variety,
        "full_stack",
        format!("Full-Stack Day: {signal_types} Different Areas"),
        "Working across the entire stack in one day",
        65,
        IdeaDetails::FullStack {
            signal_types,
            areas: patterns::categorize_day_areas(&analysis.commits, &analysis.signals),
        },
        vec![
            "Full-stack day. Touched everything from UI to infrastructure".to_string(),
            "One of those days where you context-switch constantly".to_string(),
            "From frontend to backend and everything between".to_string(),
        ],
    )
}

fn infrastructure_idea(signals: &SignalCounts) -> Idea {
    let challenges = patterns::infrastructure_challenges(signals);
    Idea::new(
        IdeaKind::TechnicalDecision,
        "infrastructure",
        format!("Infrastructure Work: {}", challenges.join(" & ")),
        "The behind-the-scenes technical work",
        80,
        IdeaDetails::Infrastructure { challenges },
        vec![
            "Working on the stuff that doesn't show up in the UI".to_string(),
            "Infrastructure changes - invisible but critical".to_string(),
            "Making sure the foundation is solid".to_string(),
        ],
    )
}

fn daily_summary_idea(
    analysis: &AggregateAnalysis,
    commit_patterns: &CommitPatterns,
    time_span: TimeSpan,
) -> Idea {
    let commits = analysis.total_commits;
    let files = analysis.total_files_changed;
    Idea::new(
        IdeaKind::DailySummary,
        "productivity",
        format!("Daily Wrap: {commits} Commits"),
        "High-level overview of the day's work",
        50,
        IdeaDetails::Daily {
            commits,
            files_changed: files,
            total_weight: analysis.total_weight,
            time_span,
            theme: commit_patterns
                .theme
                .clone()
                .unwrap_or_else(|| "mixed work".to_string()),
        },
        vec![
            format!("{commits} commits today. Productive day."),
            format!("Wrapped up with {commits} commits across {files} files"),
            "One of those days where you look up and it's already evening".to_string(),
        ],
    )
}

fn thematic_idea(analysis: &AggregateAnalysis, theme: &str, consistency: f64) -> Idea {
    Idea::new(
        IdeaKind::FocusedEffort,
        "thematic",
        format!("Theme: {theme}"),
        "Work centered around a specific theme or feature",
        75,
        IdeaDetails::Thematic {
            theme: theme.to_string(),
            commits: analysis.commits.len(),
            consistency,
        },
        vec![
            format!("All commits today pointed in the same direction: {theme}"),
            format!("Focused session on {theme}"),
            "When the commits tell a coherent story".to_string(),
        ],
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::analyze::{aggregate, classify_impact, AnalyzedCommit, CommitAnalysis};

    fn commit(message: &str, weight: usize, signals: &[(SignalTag, usize)]) -> AnalyzedCommit {
        let signals: SignalCounts = signals.iter().copied().collect();
        let impact = classify_impact(&signals, weight);
        AnalyzedCommit {
            sha: "abc".to_string(),
            message: message.to_string(),
            author: "Dev".to_string(),
            date: None,
            files: Vec::new(),
            repo: None,
            analysis: CommitAnalysis {
                total_files_changed: 1,
                total_weight: weight,
                signals,
                impact,
            },
        }
    }

    fn kinds(ideas: &[Idea]) -> Vec<(IdeaKind, &str, u32)> {
        ideas
            .iter()
            .map(|i| (i.kind, i.angle.as_str(), i.relevance_score))
            .collect()
    }

    #[test]
    fn empty_analysis_yields_only_daily_summary() {
        let ideas = generate_ideas(&AggregateAnalysis::default());
        assert_eq!(ideas.len(), 1);
        assert_eq!(ideas[0].kind, IdeaKind::DailySummary);
        assert_eq!(ideas[0].relevance_score, 50);
    }

    #[test]
    fn exactly_forty_percent_is_not_dominant() {
        let tags = [
            (SignalTag::AsyncChange, 4),
            (SignalTag::TestChange, 3),
            (SignalTag::ImportChange, 3),
        ];
        let even: SignalCounts = tags.into_iter().collect();
        assert_eq!(dominant_signal(&even), None);

        let ideas = generate_ideas(&aggregate(vec![commit("wip", 10, &tags)]));
        assert!(!ideas.iter().any(|i| i.kind == IdeaKind::FocusedTechnical));
    }

    #[test]
    fn just_over_forty_percent_is_dominant() {
        let counts: SignalCounts = [(SignalTag::AsyncChange, 41), (SignalTag::TestChange, 59)]
            .into_iter()
            .collect();
        assert_eq!(dominant_signal(&counts), Some((SignalTag::TestChange, 59)));
        let split: SignalCounts = [(SignalTag::AsyncChange, 41), (SignalTag::TestChange, 30), (SignalTag::ClassChange, 29)]
            .into_iter()
            .collect();
        assert_eq!(dominant_signal(&split), Some((SignalTag::AsyncChange, 41)));
    }

    #[test]
    fn barely_dominant_share_scores_above_forty() {
        let tags = [
            (SignalTag::ClassChange, 121),
            (SignalTag::TestChange, 90),
            (SignalTag::ImportChange, 89),
        ];
        let ideas = generate_ideas(&aggregate(vec![commit("wip", 10, &tags)]));
        let focused = ideas
            .iter()
            .find(|i| i.kind == IdeaKind::FocusedTechnical)
            .expect("40.3% is dominant");
        assert_eq!(focused.relevance_score, 41);
        match &focused.details {
            IdeaDetails::Focused { percentage, .. } => assert_eq!(*percentage, 41),
            other => panic!("unexpected details: {other:?}"),
        }
        assert_eq!(dominant_percentage(3, 4), 75);
    }

    #[test]
    fn large_refactor_ranks_focused_first() {
        let commits: Vec<AnalyzedCommit> = (0..8)
            .map(|i| {
                let signals: &[(SignalTag, usize)] = if i < 2 {
                    &[(SignalTag::FunctionChange, 5)]
                } else {
                    &[]
                };
                commit("tidy", 75, signals)
            })
            .collect();
        let analysis = aggregate(commits);
        assert_eq!(analysis.total_weight, 600);
        assert_eq!(analysis.total_commits, 8);
        assert_eq!(analysis.signals.count(SignalTag::FunctionChange), 10);

        let ideas = generate_ideas(&analysis);
        assert_eq!(
            kinds(&ideas),
            vec![
                (IdeaKind::FocusedTechnical, "function_change", 100),
                (IdeaKind::EngineeringPractice, "refactoring", 85),
                (IdeaKind::FocusedEffort, "thematic", 75),
                (IdeaKind::DailySummary, "productivity", 50),
            ]
        );
        match &ideas[0].details {
            IdeaDetails::Focused {
                count,
                percentage,
                commits_touched,
                ..
            } => {
                assert_eq!(*count, 10);
                assert_eq!(*percentage, 100);
                assert_eq!(*commits_touched, 2);
            }
            other => panic!("unexpected details: {other:?}"),
        }
        match &ideas[1].details {
            IdeaDetails::Refactor { reasons, scope, .. } => {
                assert_eq!(reasons, &vec!["function organization".to_string()]);
                assert_eq!(*scope, RefactorScope::Focused);
            }
            other => panic!("unexpected details: {other:?}"),
        }
    }

    #[test]
    fn equal_scores_keep_generation_order() {
        // Learning (80) is generated before infrastructure (80).
        let analysis = aggregate(vec![commit(
            "call",
            10,
            &[
                (SignalTag::AsyncChange, 4),
                (SignalTag::NetworkingChange, 1),
                (SignalTag::FunctionChange, 4),
                (SignalTag::ImportChange, 3),
            ],
        )]);
        let ideas = generate_ideas(&analysis);
        assert_eq!(
            kinds(&ideas),
            vec![
                (IdeaKind::TechnicalDecision, "risk_management", 90),
                (IdeaKind::Learning, "async_complexity", 80),
                (IdeaKind::TechnicalDecision, "infrastructure", 80),
                (IdeaKind::FocusedEffort, "thematic", 75),
                (IdeaKind::DailySummary, "productivity", 50),
            ]
        );
        assert_eq!(ideas[2].title, "Infrastructure Work: API integration");
    }

    #[test]
    fn documentation_testing_and_variety_fire() {
        let analysis = aggregate(vec![commit(
            "docs and tests",
            10,
            &[
                (SignalTag::DocHeadingChange, 2),
                (SignalTag::DocLinkChange, 1),
                (SignalTag::TestChange, 3),
                (SignalTag::FunctionChange, 2),
                (SignalTag::ImportChange, 2),
                (SignalTag::LoggingChange, 2),
            ],
        )]);
        let ideas = generate_ideas(&analysis);
        let found: Vec<IdeaKind> = ideas.iter().map(|i| i.kind).collect();
        assert!(found.contains(&IdeaKind::BuildInPublic));
        assert!(found.contains(&IdeaKind::Quality));
        assert!(found.contains(&IdeaKind::Variety));
        assert!(!found.contains(&IdeaKind::FocusedTechnical));

        let docs = ideas.iter().find(|i| i.kind == IdeaKind::BuildInPublic).unwrap();
        match &docs.details {
            IdeaDetails::Documentation {
                doc_changes, types, ..
            } => {
                assert_eq!(*doc_changes, 3);
                assert_eq!(types, &vec!["structure".to_string(), "links".to_string()]);
            }
            other => panic!("unexpected details: {other:?}"),
        }
    }

    #[test]
    fn daily_summary_falls_back_to_mixed_work() {
        let analysis = aggregate(vec![commit("fix bug", 3, &[])]);
        let ideas = generate_ideas(&analysis);
        assert_eq!(ideas.len(), 1);
        match &ideas[0].details {
            IdeaDetails::Daily { theme, time_span, .. } => {
                assert_eq!(theme, "mixed work");
                assert_eq!(*time_span, TimeSpan::Unknown);
            }
            other => panic!("unexpected details: {other:?}"),
        }
    }

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(rounded_percentage(1, 3), 33);
        assert_eq!(rounded_percentage(2, 3), 67);
        assert_eq!(rounded_percentage(1, 8), 13);
        assert_eq!(rounded_percentage(0, 0), 0);
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn ideas_are_never_empty_and_sorted(
                raw in proptest::collection::vec((0_usize..SignalTag::ALL.len(), 1_usize..8), 0..10),
                weight in 0_usize..2_000,
                commits in 1_usize..20,
            ) {
                let signals: Vec<(SignalTag, usize)> =
                    raw.into_iter().map(|(i, n)| (SignalTag::ALL[i], n)).collect();
                let batch: Vec<AnalyzedCommit> = (0..commits)
                    .map(|i| if i == 0 { commit("work", weight, &signals) } else { commit("work", 0, &[]) })
                    .collect();
                let ideas = generate_ideas(&aggregate(batch));
                prop_assert!(!ideas.is_empty());
                prop_assert!(ideas.iter().any(|i| i.kind == IdeaKind::DailySummary));
                prop_assert!(ideas.windows(2).all(|w| w[0].relevance_score >= w[1].relevance_score));
            }
        }
    }
}
