//! Signal tag vocabulary and per-tag counters.
//!
//! Every tag the classifiers can emit, and every tag the risk rules refer
//! to, is declared here. Business logic never matches on raw strings.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A discrete label describing one recognisable kind of change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalTag {
    /// `async` / `await` usage.
    AsyncChange,
    /// `try` / `catch` / `finally` blocks.
    ErrorHandlingChange,
    /// HTTP calls (`fetch(`, `axios.`, ...).
    NetworkingChange,
    /// `process.env` access.
    EnvVariableChange,
    /// Test framework calls.
    TestChange,
    /// Function declarations or arrow functions.
    FunctionChange,
    /// Class declarations.
    ClassChange,
    /// `import` / `require` statements.
    ImportChange,
    /// Console logging.
    LoggingChange,
    /// `TODO` / `FIXME` comments.
    TodoFixmeChange,
    /// Promise construction or chaining.
    PromiseChange,
    /// Markdown headings.
    DocHeadingChange,
    /// Images or other visual assets in docs.
    DocImageChange,
    /// "Built with" / "powered by" mentions.
    DocTechStackChange,
    /// Bare links in docs.
    DocLinkChange,
    /// Blank-line cleanup in docs.
    DocFormattingChange,
    /// Prose edits in docs. Referenced by the risk rules only.
    DocTextChange,
    /// Whitespace-only code edits. Referenced by the risk rules only.
    CodeFormattingChange,
    /// Comment edits. Referenced by the risk rules only.
    CommentChange,
}

impl SignalTag {
    /// All tags in declaration order.
    pub const ALL: [Self; 19] = [
        Self::AsyncChange,
        Self::ErrorHandlingChange,
        Self::NetworkingChange,
        Self::EnvVariableChange,
        Self::TestChange,
        Self::FunctionChange,
        Self::ClassChange,
        Self::ImportChange,
        Self::LoggingChange,
        Self::TodoFixmeChange,
        Self::PromiseChange,
        Self::DocHeadingChange,
        Self::DocImageChange,
        Self::DocTechStackChange,
        Self::DocLinkChange,
        Self::DocFormattingChange,
        Self::DocTextChange,
        Self::CodeFormattingChange,
        Self::CommentChange,
    ];

    /// The four doc tags that count toward a documentation story.
    pub const DOC_STORY: [Self; 4] = [
        Self::DocImageChange,
        Self::DocHeadingChange,
        Self::DocLinkChange,
        Self::DocTechStackChange,
    ];

    /// Returns the snake_case wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AsyncChange => "async_change",
            Self::ErrorHandlingChange => "error_handling_change",
            Self::NetworkingChange => "networking_change",
            Self::EnvVariableChange => "env_variable_change",
            Self::TestChange => "test_change",
            Self::FunctionChange => "function_change",
            Self::ClassChange => "class_change",
            Self::ImportChange => "import_change",
            Self::LoggingChange => "logging_change",
            Self::TodoFixmeChange => "todo_fixme_change",
            Self::PromiseChange => "promise_change",
            Self::DocHeadingChange => "doc_heading_change",
            Self::DocImageChange => "doc_image_change",
            Self::DocTechStackChange => "doc_tech_stack_change",
            Self::DocLinkChange => "doc_link_change",
            Self::DocFormattingChange => "doc_formatting_change",
            Self::DocTextChange => "doc_text_change",
            Self::CodeFormattingChange => "code_formatting_change",
            Self::CommentChange => "comment_change",
        }
    }

    /// Returns a phrase suitable for post text.
    pub fn readable(self) -> String {
        let phrase = match self {
            Self::AsyncChange => "async/await patterns",
            Self::NetworkingChange => "API calls",
            Self::ErrorHandlingChange => "error handling",
            Self::TestChange => "testing",
            Self::PromiseChange => "promise handling",
            Self::FunctionChange => "function refactoring",
            Self::ImportChange => "dependency updates",
            Self::ClassChange => "class structures",
            Self::LoggingChange => "logging",
            Self::DocImageChange => "documentation images",
            Self::DocHeadingChange => "documentation structure",
            Self::DocLinkChange => "documentation links",
            Self::EnvVariableChange => "environment config",
            other => return other.as_str().replace('_', " "),
        };
        phrase.to_string()
    }

    /// Whether this tag comes from the doc classifier family.
    pub fn is_doc(self) -> bool {
        matches!(
            self,
            Self::DocHeadingChange
                | Self::DocImageChange
                | Self::DocTechStackChange
                | Self::DocLinkChange
                | Self::DocFormattingChange
                | Self::DocTextChange
        )
    }
}

impl fmt::Display for SignalTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown tag name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown signal tag: {0}")]
pub struct UnknownSignalTag(pub String);

impl FromStr for SignalTag {
    type Err = UnknownSignalTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| UnknownSignalTag(s.to_string()))
    }
}

/// Occurrence counts keyed by signal tag.
///
/// Zero counts are never stored, so `contains` and `count > 0` agree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignalCounts(BTreeMap<SignalTag, usize>);

impl SignalCounts {
    /// Creates an empty counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `n` occurrences of `tag`.
    pub fn add(&mut self, tag: SignalTag, n: usize) {
        if n > 0 {
            *self.0.entry(tag).or_insert(0) += n;
        }
    }

    /// Adds every count from `other`.
    pub fn merge(&mut self, other: &Self) {
        for (&tag, &n) in &other.0 {
            self.add(tag, n);
        }
    }

    /// Returns the count for `tag`, zero when absent.
    pub fn count(&self, tag: SignalTag) -> usize {
        self.0.get(&tag).copied().unwrap_or(0)
    }

    /// Whether `tag` occurred at least once.
    pub fn contains(&self, tag: SignalTag) -> bool {
        self.count(tag) > 0
    }

    /// Whether any of `tags` occurred.
    pub fn any(&self, tags: &[SignalTag]) -> bool {
        tags.iter().any(|&tag| self.contains(tag))
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    /// Number of distinct tags present.
    pub fn distinct(&self) -> usize {
        self.0.len()
    }

    /// Whether no tag has been counted.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates `(tag, count)` pairs in tag order.
    pub fn iter(&self) -> impl Iterator<Item = (SignalTag, usize)> + '_ {
        self.0.iter().map(|(&tag, &n)| (tag, n))
    }

    /// Returns the tag with the highest count.
    ///
    /// Ties go to the tag declared first in [`SignalTag`].
    pub fn dominant(&self) -> Option<(SignalTag, usize)> {
        let mut best: Option<(SignalTag, usize)> = None;
        for (tag, n) in self.iter() {
            if best.map_or(true, |(_, top)| n > top) {
                best = Some((tag, n));
            }
        }
        best
    }
}

impl FromIterator<(SignalTag, usize)> for SignalCounts {
    fn from_iter<I: IntoIterator<Item = (SignalTag, usize)>>(iter: I) -> Self {
        let mut counts = Self::new();
        for (tag, n) in iter {
            counts.add(tag, n);
        }
        counts
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_round_trip_through_from_str() {
        for tag in SignalTag::ALL {
            assert_eq!(tag.as_str().parse::<SignalTag>().unwrap(), tag);
        }
    }

    #[test]
    fn serde_uses_snake_case_names() {
        let json = serde_json::to_string(&SignalTag::EnvVariableChange).unwrap();
        assert_eq!(json, "\"env_variable_change\"");
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let err = "jsx_change".parse::<SignalTag>().unwrap_err();
        assert_eq!(err, UnknownSignalTag("jsx_change".to_string()));
    }

    #[test]
    fn readable_falls_back_to_spaced_name() {
        assert_eq!(SignalTag::AsyncChange.readable(), "async/await patterns");
        assert_eq!(SignalTag::TodoFixmeChange.readable(), "todo fixme change");
    }

    #[test]
    fn counts_ignore_zero_additions() {
        let mut counts = SignalCounts::new();
        counts.add(SignalTag::TestChange, 0);
        assert!(counts.is_empty());
        assert!(!counts.contains(SignalTag::TestChange));
    }

    #[test]
    fn merge_sums_per_tag() {
        let mut a: SignalCounts = [(SignalTag::AsyncChange, 5)].into_iter().collect();
        let b: SignalCounts = [(SignalTag::AsyncChange, 3), (SignalTag::TestChange, 4)]
            .into_iter()
            .collect();
        a.merge(&b);
        assert_eq!(a.count(SignalTag::AsyncChange), 8);
        assert_eq!(a.count(SignalTag::TestChange), 4);
        assert_eq!(a.total(), 12);
        assert_eq!(a.distinct(), 2);
    }

    #[test]
    fn dominant_prefers_first_declared_on_tie() {
        let counts: SignalCounts = [(SignalTag::TestChange, 2), (SignalTag::AsyncChange, 2)]
            .into_iter()
            .collect();
        assert_eq!(counts.dominant(), Some((SignalTag::AsyncChange, 2)));
        assert_eq!(SignalCounts::new().dominant(), None);
    }
}
