//! # commitcast
//!
//! Turns a developer's recent commits into social media post drafts.
//!
//! Each changed file's diff is classified into signal tags with pattern
//! rules. Commits are scored for risk and folded into one aggregate, which
//! drives a set of ranked post ideas. Ideas are rendered into templated
//! drafts that an LLM can optionally polish.
//!
//! ## Quick Start
//!
//! ```rust
//! use commitcast::data::{ChangedFile, CommitAuthor, CommitRecord};
//!
//! let commit = CommitRecord {
//!     sha: "abc123".to_string(),
//!     message: "feat: retry failed uploads".to_string(),
//!     author: CommitAuthor::default(),
//!     files: vec![ChangedFile {
//!         filename: "src/upload.js".to_string(),
//!         status: "modified".to_string(),
//!         additions: 12,
//!         deletions: 3,
//!         patch: Some("+const res = await fetch(url)".to_string()),
//!     }],
//!     repo: None,
//! };
//!
//! let output = commitcast::pipeline::run(&[commit]);
//! assert_eq!(output.aggregate.total_commits, 1);
//! assert!(!output.ideas.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod analyze;
pub mod cli;
pub mod compose;
pub mod config;
pub mod data;
pub mod extract;
pub mod ideas;
pub mod pipeline;
pub mod rewrite;
pub mod signals;
pub mod source;
pub mod utils;

pub use crate::cli::Cli;

/// The current version of commitcast.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
