//! Where commit records come from: the GitHub API or a JSON file.

pub mod error;
pub mod github;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::debug;

pub use error::SourceError;
pub use github::{GitHubClient, GitHubCommitDetail};

use crate::data::CommitRecord;

/// Parses a JSON array of commit records or raw GitHub commit details.
///
/// The two shapes may be mixed within one array. An element with a `commit`
/// object is read as a GitHub detail, anything else as a commit record, and
/// a malformed element reports that shape's error with its index.
pub fn parse_commits(json: &str) -> Result<Vec<CommitRecord>> {
    let elements: Vec<Value> = serde_json::from_str(json).context("Failed to parse commit JSON")?;
    elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| {
            parse_element(element).with_context(|| format!("Invalid commit at index {index}"))
        })
        .collect()
}

fn parse_element(element: Value) -> Result<CommitRecord> {
    if element.get("commit").is_some_and(Value::is_object) {
        let detail: GitHubCommitDetail =
            serde_json::from_value(element).context("Not a GitHub commit detail")?;
        return Ok(detail.into_record(None));
    }
    serde_json::from_value(element).context("Not a commit record")
}

/// Loads commits from a JSON file.
pub fn load_commits<P: AsRef<Path>>(path: P) -> Result<Vec<CommitRecord>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read commit file: {}", path.display()))?;
    let commits = parse_commits(&content)
        .with_context(|| format!("Invalid commit file: {}", path.display()))?;
    debug!(path = %path.display(), count = commits.len(), "Loaded commits");
    Ok(commits)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MIXED: &str = r#"[
        {
            "sha": "aaa",
            "message": "feat: record shape",
            "author": {"name": "Ada", "date": "2024-03-01T09:00:00Z"},
            "files": [{"filename": "a.js", "status": "added", "additions": 2, "deletions": 0, "patch": "+x"}],
            "repo": "ada/app"
        },
        {
            "sha": "bbb",
            "commit": {"message": "fix: github shape", "author": {"name": "Bob", "date": "2024-03-01T11:00:00Z"}},
            "author": {"login": "bob"},
            "files": []
        }
    ]"#;

    #[test]
    fn parses_both_shapes() {
        let commits = parse_commits(MIXED).unwrap();
        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].author.name, "Ada");
        assert_eq!(commits[0].repo.as_deref(), Some("ada/app"));
        assert_eq!(commits[1].message, "fix: github shape");
        assert_eq!(commits[1].author.name, "Bob");
        assert!(commits[1].repo.is_none());
    }

    #[test]
    fn load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("commits.json");
        fs::write(&path, MIXED).unwrap();
        assert_eq!(load_commits(&path).unwrap().len(), 2);
    }

    #[test]
    fn missing_file_names_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.json");
        let err = load_commits(&path).unwrap_err();
        assert!(format!("{err:#}").contains("nope.json"));
    }

    #[test]
    fn malformed_record_names_index_and_field() {
        let json = r#"[
            {"sha": "a", "message": "ok", "author": {"name": "Ada"}, "files": []},
            {"sha": "b", "author": {"name": "Ada"}, "files": []}
        ]"#;
        let err = format!("{:#}", parse_commits(json).unwrap_err());
        assert!(err.contains("index 1"), "{err}");
        assert!(err.contains("Not a commit record"), "{err}");
        assert!(err.contains("missing field `message`"), "{err}");
        assert!(!err.contains("did not match any variant"), "{err}");
    }

    #[test]
    fn malformed_github_detail_reports_detail_error() {
        let json = r#"[{"sha": "b", "commit": {"author": {"name": "Bob"}}}]"#;
        let err = format!("{:#}", parse_commits(json).unwrap_err());
        assert!(err.contains("Not a GitHub commit detail"), "{err}");
        assert!(err.contains("missing field `message`"), "{err}");
    }

    #[test]
    fn rejects_non_array() {
        assert!(parse_commits(r#"{"sha": "x"}"#).is_err());
    }
}
