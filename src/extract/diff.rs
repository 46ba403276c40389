//! Unified diff line extraction.

/// Direction of a changed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Line introduced by the change (`+`).
    Addition,
    /// Line removed by the change (`-`).
    Deletion,
}

/// One added or removed line with its marker stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    /// Whether the line was added or removed.
    pub kind: LineKind,
    /// Line content without the marker, trimmed.
    pub text: String,
}

impl DiffLine {
    /// Whether this line was added.
    pub fn is_addition(&self) -> bool {
        self.kind == LineKind::Addition
    }
}

/// Extracts added and removed lines from a patch.
///
/// A missing or empty patch yields no lines. Context lines, hunk headers and
/// `+++ b/...` / `--- a/...` file headers are skipped.
pub fn parse_patch(patch: Option<&str>) -> Vec<DiffLine> {
    let Some(patch) = patch else {
        return Vec::new();
    };

    patch
        .split('\n')
        .filter(|line| !is_file_header(line))
        .filter_map(|line| {
            let kind = match line.as_bytes().first() {
                Some(b'+') => LineKind::Addition,
                Some(b'-') => LineKind::Deletion,
                _ => return None,
            };
            Some(DiffLine {
                kind,
                text: line[1..].trim().to_string(),
            })
        })
        .collect()
}

/// Returns the added lines of a patch, marker stripped and trimmed.
pub fn added_lines(patch: Option<&str>) -> Vec<String> {
    parse_patch(patch)
        .into_iter()
        .filter(DiffLine::is_addition)
        .map(|line| line.text)
        .collect()
}

/// Recognises `--- a/path`, `+++ b/path` and `/dev/null` file headers.
fn is_file_header(line: &str) -> bool {
    let Some(rest) = line
        .strip_prefix("+++ ")
        .or_else(|| line.strip_prefix("--- "))
    else {
        return false;
    };
    rest.starts_with("a/") || rest.starts_with("b/") || rest.starts_with("/dev/null")
}
