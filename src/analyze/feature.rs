//! Feature label detection from commit messages.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

/// Label returned when nothing more specific can be inferred.
pub const FALLBACK_FEATURE: &str = "Feature Development";

/// Ordered `(pattern, label)` table; the first match wins.
pub const FEATURE_PATTERNS: &[(&str, &str)] = &[
    (r"auth|login|signup|password|token|jwt|session|oauth", "Authentication System"),
    (r"payment|stripe|checkout|billing|invoice|subscription", "Payment Processing"),
    (r"\bchat\b|messaging|websocket|socket\.io|real-?time", "Real-time Chat"),
    (r"upload|attachment|file.?(storage|manager|picker)", "File Management"),
    (r"search|autocomplete|full.?text", "Search Functionality"),
    (r"analytics|dashboard|chart|metrics?\b|tracking", "Analytics Dashboard"),
    (r"notification|notify|\bemail|\bsms\b|\balert", "Notification System"),
    (r"\btests?\b|testing|jest|vitest|cypress|coverage|\bspec\b", "Testing Infrastructure"),
    (r"database|schema|migration|prisma|\bsql\b|postgres|mongo", "Database Architecture"),
    (r"docker|deploy|ci/cd|pipeline|kubernetes|workflow|terraform", "DevOps Pipeline"),
    (r"security|\bxss\b|csrf|saniti[sz]|vulnerab|encrypt", "Security Hardening"),
    (
        r"perf\b|performance|optimi[sz]|speed|\bcache|lazy.?load|memoi[sz]",
        "Performance Optimization",
    ),
    (r"\bapi\b|endpoint|\broutes?\b|graphql|\brest\b", "API Development"),
    (r"\bui\b|component|button|modal|layout|styl(e|ing)|\bcss\b", "UI Components"),
    (r"a11y|accessib|\baria\b|screen.?reader", "Accessibility"),
    (r"\bstate\b|redux|zustand|\bstore\b", "State Management"),
    (r"responsive|mobile|breakpoint|media.?quer", "Responsive Design"),
    (r"i18n|locale|translat|internationali[sz]", "Internationalization"),
    (r"\bqueue|worker|\bcron\b|\bjobs?\b|scheduler", "Background Jobs"),
    (r"\bexport|\bcsv\b|download", "Data Export"),
    (r"\bimport(er|ing)?\b|ingest", "Data Import"),
    (r"rate.?limit|throttl", "Rate Limiting"),
    (r"\bretry|backoff|circuit.?breaker|fallback|timeout", "Resilience Patterns"),
];

/// Words too generic to name a feature.
const STOPWORDS: &[&str] = &[
    "about", "added", "adding", "after", "again", "before", "branch", "change", "changes",
    "cleanup", "commit", "commits", "fixed", "fixes", "fixing", "initial", "merge", "merged",
    "minor", "other", "pull", "remove", "removed", "request", "small", "stuff", "their",
    "there", "these", "things", "update", "updated", "updates", "which", "while", "working",
];

#[allow(clippy::expect_used)] // Compile-time constant regex patterns
static FEATURE_MATCHERS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    FEATURE_PATTERNS
        .iter()
        .map(|(pattern, label)| {
            (
                Regex::new(pattern).expect("feature pattern must compile"),
                *label,
            )
        })
        .collect()
});

#[allow(clippy::unwrap_used)] // Compile-time constant regex pattern
static TOKEN_SPLIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// Guesses what was built from a set of commit messages.
///
/// Always returns a non-empty label, [`FALLBACK_FEATURE`] when nothing stands out.
pub fn extract_feature<'a, I>(messages: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let text = messages
        .into_iter()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ");

    if let Some((_, label)) = FEATURE_MATCHERS.iter().find(|(regex, _)| regex.is_match(&text)) {
        return (*label).to_string();
    }

    match top_token(&text) {
        Some((token, count)) if count >= 2 => format!("{} Feature", titlecase(token)),
        _ => FALLBACK_FEATURE.to_string(),
    }
}

/// Most frequent meaningful token; ties go to the token seen first.
fn top_token(text: &str) -> Option<(&str, usize)> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for token in TOKEN_SPLIT.split(text) {
        if token.chars().count() <= 4 || STOPWORDS.contains(&token) {
            continue;
        }
        let count = counts.entry(token).or_insert(0);
        if *count == 0 {
            order.push(token);
        }
        *count += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for token in order {
        let count = counts[token];
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((token, count));
        }
    }
    best
}

fn titlecase(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
