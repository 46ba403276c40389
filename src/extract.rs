//! Commit signal extraction: diff parsing, classification and summaries.

pub mod classifier;
pub mod context;
pub mod diff;
pub mod summary;

use tracing::debug;

pub use classifier::{classify_file, ClassifierKind};
pub use context::{extract_specific_context, SpecificContext};
pub use diff::{parse_patch, DiffLine, LineKind};
pub use summary::FileChangeSummary;

use crate::data::CommitRecord;

/// Classifies every file of a commit and keeps the ones that carry signals.
///
/// Files without a patch or with an unrecognised extension are skipped.
/// Summaries follow the commit's file order.
pub fn extract_commit_signals(commit: &CommitRecord) -> Vec<FileChangeSummary> {
    let mut summaries = Vec::new();

    for file in &commit.files {
        let Some(patch) = file.patch.as_deref() else {
            debug!(file = %file.filename, "Skipping file without patch");
            continue;
        };

        let lines = parse_patch(Some(patch));
        let signals = classify_file(&file.filename, &lines);
        if signals.is_empty() {
            debug!(file = %file.filename, lines = lines.len(), "No signals in file");
            continue;
        }

        debug!(file = %file.filename, signals = ?signals, "Classified file");
        summaries.push(FileChangeSummary::new(file, signals));
    }

    summaries
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::data::{ChangedFile, CommitAuthor};
    use crate::signals::SignalTag;

    fn file(name: &str, additions: usize, deletions: usize, patch: Option<&str>) -> ChangedFile {
        ChangedFile {
            filename: name.to_string(),
            status: "modified".to_string(),
            additions,
            deletions,
            patch: patch.map(str::to_string),
        }
    }

    fn commit(files: Vec<ChangedFile>) -> CommitRecord {
        CommitRecord {
            sha: "deadbeef".to_string(),
            message: "work".to_string(),
            author: CommitAuthor::default(),
            files,
            repo: None,
        }
    }

    #[test]
    fn keeps_only_files_with_signals_in_order() {
        let record = commit(vec![
            file("src/api.js", 10, 2, Some("+await fetch('/x')")),
            file("logo.png", 0, 0, None),
            file("src/main.rs", 4, 4, Some("+async fn main() {}")),
            file("src/math.ts", 3, 0, Some("+const x = a + b;")),
            file("README.md", 1, 0, Some("+## Usage")),
        ]);
        let summaries = extract_commit_signals(&record);
        let paths: Vec<&str> = summaries.iter().map(|s| s.path.as_str()).collect();
        assert_eq!(paths, vec!["src/api.js", "README.md"]);
        assert_eq!(summaries[0].weight, 12);
        assert!(summaries[1].signals.contains(&SignalTag::DocHeadingChange));
    }

    #[test]
    fn empty_patch_is_not_an_error() {
        let record = commit(vec![file("src/app.js", 0, 0, Some(""))]);
        assert!(extract_commit_signals(&record).is_empty());
    }
}
