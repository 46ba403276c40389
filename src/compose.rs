//! Template-based post drafting.

use crate::analyze::AggregateAnalysis;
use crate::ideas::{Idea, IdeaDetails, IdeaKind};
use crate::signals::SignalTag;

/// Signals worth naming in a narrative, most interesting first.
const KEY_CHANGE_PRIORITY: [SignalTag; 7] = [
    SignalTag::AsyncChange,
    SignalTag::NetworkingChange,
    SignalTag::ErrorHandlingChange,
    SignalTag::TestChange,
    SignalTag::PromiseChange,
    SignalTag::FunctionChange,
    SignalTag::ImportChange,
];

/// Extensions longer than this are treated as noise.
const MAX_EXTENSION_LEN: usize = 4;

/// Renders a draft post for `idea`: hook, narrative, optional context and a
/// closing reflection, separated by blank lines.
pub fn compose_post(idea: &Idea, analysis: &AggregateAnalysis) -> String {
    let mut parts = vec![hook(idea, analysis), narrative(idea, analysis)];
    if let Some(context) = context(idea.kind) {
        parts.push(context.to_string());
    }
    parts.push(reflection(idea.kind).to_string());
    parts.join("\n\n")
}

fn hook(idea: &Idea, analysis: &AggregateAnalysis) -> String {
    let commits = analysis.total_commits;
    match (&idea.kind, &idea.details) {
        (IdeaKind::DailySummary, _) if commits > 10 => format!(
            "{commits} commits today. One of those days where you look up and realize you've been in the zone for hours."
        ),
        (IdeaKind::DailySummary, _) => format!("Wrapped up today with {commits} commits."),
        (IdeaKind::FocusedTechnical, IdeaDetails::Focused { signal, .. }) => {
            format!("Spent most of today deep in {}.", signal.readable())
        }
        (IdeaKind::Learning, _) => "Hit a learning curve today with async patterns.".to_string(),
        (IdeaKind::BuildInPublic, _) => {
            "Took a step back from features today to focus on documentation.".to_string()
        }
        (IdeaKind::TechnicalDecision, _) => {
            "Made some decisions today that needed more thought than usual.".to_string()
        }
        (IdeaKind::EngineeringPractice, _) => format!(
            "{} lines changed across {commits} commits. Big refactor day.",
            analysis.total_weight
        ),
        (IdeaKind::Quality, _) => "Testing day. Not the most glamorous work, but necessary.".to_string(),
        (IdeaKind::Variety, _) => "Full-stack kind of day.".to_string(),
        _ => "Made progress today.".to_string(),
    }
}

fn narrative(idea: &Idea, analysis: &AggregateAnalysis) -> String {
    let commits = analysis.total_commits;
    let weight = analysis.total_weight;

    match &idea.details {
        IdeaDetails::Daily { files_changed, .. } => {
            let types = file_types(analysis);
            let types: Vec<&str> = types.iter().take(3).map(String::as_str).collect();
            let theme = key_changes(analysis)
                .into_iter()
                .next()
                .unwrap_or_else(|| "Various improvements".to_string());
            if types.is_empty() {
                format!("Touched {files_changed} files. {theme} was the main theme.")
            } else {
                format!(
                    "Touched {files_changed} files - mostly {}. {theme} was the main theme.",
                    types.join(", ")
                )
            }
        }
        IdeaDetails::Focused { signal, count, .. } => format!(
            "{count} separate instances of {} across the codebase. Started with one file, realized the pattern was everywhere, ended up doing a systematic pass.",
            signal.readable()
        ),
        IdeaDetails::Learning {
            async_changes,
            promise_changes,
            ..
        } => format!(
            "Working with {async_changes} async changes and {promise_changes} promise updates. The tricky part isn't writing async code - it's handling all the edge cases when things don't resolve as expected."
        ),
        IdeaDetails::Documentation { doc_changes, .. } => format!(
            "{doc_changes} documentation updates. Added examples, fixed outdated sections, made sure the README actually reflects what the project does now."
        ),
        IdeaDetails::Risk {
            high_risk_commits, ..
        } => format!(
            "{high_risk_commits} commits that touched networking or environment config. These aren't the kind of changes you make lightly - one wrong env variable and things break in production."
        ),
        IdeaDetails::Infrastructure { challenges } => format!(
            "Worked through {}. None of it shows up in a screenshot, but everything else depends on it.",
            challenges.join(" and ")
        ),
        IdeaDetails::Refactor { .. } => format!(
            "What started as \"let me just clean this up\" turned into {commits} commits and {weight} lines of changes. Sometimes you pull one thread and the whole sweater unravels - in a good way."
        ),
        IdeaDetails::Testing { test_changes, .. } => format!(
            "Added and updated {test_changes} tests. The kind of work that doesn't show up in demos but saves hours of debugging later."
        ),
        IdeaDetails::FullStack { .. } => {
            let areas: Vec<String> = analysis
                .signals
                .iter()
                .take(4)
                .map(|(tag, _)| tag.readable())
                .collect();
            format!(
                "Jumped between {}. One of those days where you're touching everything from frontend to infrastructure.",
                areas.join(", ")
            )
        }
        IdeaDetails::Thematic { .. } => {
            "Working through the backlog, one commit at a time.".to_string()
        }
    }
}

fn context(kind: IdeaKind) -> Option<&'static str> {
    let text = match kind {
        IdeaKind::FocusedTechnical => {
            "The codebase was inconsistent - some files using one pattern, others using another. Better to fix it all at once than let it drift further apart."
        }
        IdeaKind::Learning => {
            "Async JavaScript still catches me sometimes. You think you understand it, then you hit a race condition or an unhandled rejection that reminds you there's always more to learn."
        }
        IdeaKind::BuildInPublic => {
            "Good documentation is the difference between someone understanding your project in 5 minutes versus giving up and moving on. Worth the investment."
        }
        IdeaKind::TechnicalDecision => {
            "These changes needed testing, double-checking, and a clear rollback plan. Engineering isn't just about making things work - it's about making sure they keep working."
        }
        IdeaKind::EngineeringPractice => {
            "The refactor was overdue. Code had accumulated enough cruft that adding new features was getting harder. Sometimes you need to stop and clean house."
        }
        IdeaKind::Quality => {
            "Tests are insurance. They don't prevent bugs, but they catch them before users do. And they let you refactor with confidence."
        }
        IdeaKind::Variety | IdeaKind::DailySummary | IdeaKind::FocusedEffort => return None,
    };
    Some(text)
}

fn reflection(kind: IdeaKind) -> &'static str {
    match kind {
        IdeaKind::DailySummary => {
            "Not every day needs to be about shipping features. Sometimes it's about making the foundation stronger."
        }
        IdeaKind::FocusedTechnical => {
            "Consistency compounds. Fix patterns once, benefit every time you touch that code."
        }
        IdeaKind::Learning => "Still learning. Always will be. That's why this work stays interesting.",
        IdeaKind::BuildInPublic => "Documentation is code. Treat it with the same care.",
        IdeaKind::TechnicalDecision => {
            "Good engineering is mostly boring. It's careful, measured, and defensive. That's what makes it reliable."
        }
        IdeaKind::EngineeringPractice => {
            "Refactoring feels indulgent until you try to add a feature to messy code. Then it feels essential."
        }
        IdeaKind::Quality => "The best code is the code that works when you're not watching.",
        IdeaKind::Variety => {
            "Full-stack work keeps you sharp. You can't hide behind specialization when you're responsible for everything."
        }
        IdeaKind::FocusedEffort => "Progress over perfection. Ship it, learn from it, improve it.",
    }
}

/// Display names of the file types touched, in first-seen order.
pub fn file_types(analysis: &AggregateAnalysis) -> Vec<String> {
    let mut extensions: Vec<&str> = Vec::new();
    for file in analysis.commits.iter().flat_map(|c| &c.files) {
        let Some((_, ext)) = file.filename.rsplit_once('.') else {
            continue;
        };
        if ext.len() <= MAX_EXTENSION_LEN && !extensions.contains(&ext) {
            extensions.push(ext);
        }
    }

    let mut names: Vec<String> = Vec::new();
    for ext in extensions {
        let name = display_name(ext);
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

fn display_name(ext: &str) -> &str {
    match ext {
        "js" => "JavaScript",
        "ts" => "TypeScript",
        "jsx" => "React",
        "tsx" => "React/TS",
        "md" => "docs",
        "json" => "config",
        "css" | "scss" => "styles",
        other => other,
    }
}

/// Readable names of the notable signals present, in priority order.
pub fn key_changes(analysis: &AggregateAnalysis) -> Vec<String> {
    KEY_CHANGE_PRIORITY
        .iter()
        .filter(|tag| analysis.signals.contains(**tag))
        .map(|tag| tag.readable())
        .collect()
}
