//! Per-file change summaries.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::data::ChangedFile;
use crate::signals::SignalTag;

/// Classified change to one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChangeSummary {
    /// File path.
    pub path: String,
    /// Change status reported by the data source.
    pub status: String,
    /// Distinct signals found in the file's diff.
    pub signals: BTreeSet<SignalTag>,
    /// `additions + deletions` for the file.
    pub weight: usize,
}

impl FileChangeSummary {
    /// Packages a file and its signals into a summary.
    pub fn new(file: &ChangedFile, signals: BTreeSet<SignalTag>) -> Self {
        Self {
            path: file.filename.clone(),
            status: file.status.clone(),
            signals,
            weight: file.weight(),
        }
    }
}
