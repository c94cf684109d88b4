//! Core functionality for the git-local-backup tool.
//!
//! Leaf modules come first: paths, git queries, force-include expansion, the
//! backup snapshot and file transfer. [`relevance`] combines them into candidate
//! files and [`reconcile`] decides what to copy, delete and prune.

pub mod config;
pub mod dirs;
pub mod error;
pub mod force_include;
pub mod git;
pub mod output;
pub mod paths;
pub mod reconcile;
pub mod relevance;
pub mod snapshot;
pub mod transfer;

// === Error handling ===
pub use error::{BackupError, Result};

// === Paths ===
// Join key between project space and backup space
pub use paths::RelativePath;

// === Git operations ===
pub use git::{GitRepo, VcsFiles};

// === Candidate resolution ===
pub use relevance::{CandidateFile, ProjectDirectory, Relevance};

// === Backup tree ===
pub use snapshot::BackupSnapshot;

// === Reconciliation ===
pub use reconcile::{Action, Failure, Mode, ReconcileOptions, ReconcileReport, Reconciler};

// === Configuration ===
pub use config::{BackupConfig, CliOverrides, FileConfig, Resolved};

// === Output formatting ===
pub use output::{print_error, print_failure, print_planned_action, print_section_header};
