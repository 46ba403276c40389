//! Pattern-based change classification.
//!
//! Each classifier is an ordered table of `(tag, pattern)` rules. Every rule
//! is tested against every line; rules are independent and a line may match
//! several of them. A file's result is the set of tags matched by any line.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use super::diff::DiffLine;
use crate::signals::SignalTag;

/// A declarative classification rule.
#[derive(Debug, Clone, Copy)]
pub struct SignalRule {
    /// Tag emitted when the pattern matches.
    pub tag: SignalTag,
    /// Regular expression tested against a line.
    pub pattern: &'static str,
}

/// Rules for JavaScript/TypeScript-like sources.
pub const CODE_RULES: &[SignalRule] = &[
    SignalRule {
        tag: SignalTag::AsyncChange,
        pattern: r"\b(async|await)\b",
    },
    SignalRule {
        tag: SignalTag::ErrorHandlingChange,
        pattern: r"\btry\s*\{|\bcatch\s*\(.*\)\s*\{|\bfinally\s*\{",
    },
    SignalRule {
        tag: SignalTag::NetworkingChange,
        pattern: r"\bfetch\(|\baxios\.|\bhttp\.get\(|\bhttp\.post\(",
    },
    SignalRule {
        tag: SignalTag::EnvVariableChange,
        pattern: r"process\.env",
    },
    SignalRule {
        tag: SignalTag::TestChange,
        pattern: r"\b(describe|it|test)\(",
    },
    SignalRule {
        tag: SignalTag::FunctionChange,
        pattern: r"\bfunction\s+\w+\s*\(.*\)\s*\{|\(.*\)\s*=>\s*\{",
    },
    SignalRule {
        tag: SignalTag::ClassChange,
        pattern: r"\bclass\s+\w+.*\{",
    },
    SignalRule {
        tag: SignalTag::ImportChange,
        pattern: r#"\bimport\s+.*\s+from\s+['"].*['"]|\brequire\(\s*['"].*['"]\s*\)"#,
    },
    SignalRule {
        tag: SignalTag::LoggingChange,
        pattern: r"console\.(log|error|warn)\(",
    },
    SignalRule {
        tag: SignalTag::TodoFixmeChange,
        pattern: r"//\s*(TODO|FIXME)",
    },
    SignalRule {
        tag: SignalTag::PromiseChange,
        pattern: r"\bnew\s+Promise\(|\.then\(|\.catch\(",
    },
];

/// Rules for Markdown-like documents, tested against lower-cased lines.
pub const DOC_RULES: &[SignalRule] = &[
    SignalRule {
        tag: SignalTag::DocHeadingChange,
        pattern: r"^#+\s",
    },
    SignalRule {
        tag: SignalTag::DocImageChange,
        pattern: r"github\.com/user-attachments|!\[[^\]]*\]\(|\.(png|jpe?g|gif|svg|webp)\b",
    },
    SignalRule {
        tag: SignalTag::DocTechStackChange,
        pattern: r"built with|powered by",
    },
    SignalRule {
        tag: SignalTag::DocLinkChange,
        pattern: r"^http",
    },
    SignalRule {
        tag: SignalTag::DocFormattingChange,
        pattern: r"^\s*$",
    },
];

#[allow(clippy::expect_used)] // Compile-time constant regex patterns
fn compile(rules: &[SignalRule]) -> Vec<(SignalTag, Regex)> {
    rules
        .iter()
        .map(|rule| {
            let regex = Regex::new(rule.pattern).expect("classifier pattern must compile");
            (rule.tag, regex)
        })
        .collect()
}

static CODE_MATCHERS: LazyLock<Vec<(SignalTag, Regex)>> = LazyLock::new(|| compile(CODE_RULES));

static DOC_MATCHERS: LazyLock<Vec<(SignalTag, Regex)>> = LazyLock::new(|| compile(DOC_RULES));

/// Which rule table applies to a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierKind {
    /// Source code rules.
    Code,
    /// Documentation rules.
    Doc,
}

impl ClassifierKind {
    /// Picks the classifier for a path by its extension.
    ///
    /// Returns `None` for extensions neither classifier understands.
    pub fn for_path(path: &str) -> Option<Self> {
        let file_name = path.rsplit('/').next().unwrap_or(path);
        let (_, ext) = file_name.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "js" | "jsx" | "ts" | "tsx" | "mjs" | "cjs" => Some(Self::Code),
            "md" | "markdown" | "mdx" => Some(Self::Doc),
            _ => None,
        }
    }

    /// Classifies a file's changed lines into a deduplicated tag set.
    pub fn classify(self, lines: &[DiffLine]) -> BTreeSet<SignalTag> {
        let matchers: &[(SignalTag, Regex)] = match self {
            Self::Code => CODE_MATCHERS.as_slice(),
            Self::Doc => DOC_MATCHERS.as_slice(),
        };

        let mut signals = BTreeSet::new();
        for line in lines {
            let text = match self {
                Self::Code => line.text.clone(),
                Self::Doc => line.text.to_lowercase(),
            };
            for (tag, regex) in matchers {
                if regex.is_match(&text) {
                    signals.insert(*tag);
                }
            }
        }
        signals
    }
}

/// Classifies the lines of `path`, returning an empty set for unknown file types.
pub fn classify_file(path: &str, lines: &[DiffLine]) -> BTreeSet<SignalTag> {
    ClassifierKind::for_path(path).map_or_else(BTreeSet::new, |kind| kind.classify(lines))
}
