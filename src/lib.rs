//! Git Local Backup - copies every file of your local git projects that is not
//! safe on a remote yet into a mirrored backup directory.
//!
//! A run snapshots the backup tree, asks git which files of each project are
//! untracked, uncommitted or unpushed, adds force-included paths, and then
//! reconciles: changed files are copied, files no longer at risk are deleted
//! and emptied directories are pruned.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module, and
//! [`commands::execute_backup`] runs a complete pass.

pub mod commands;
pub mod core;

// Re-export the core public API for external users
pub use core::{
    Action,
    BackupConfig,
    // Error handling
    BackupError,
    BackupSnapshot,
    CandidateFile,
    // Git operations
    GitRepo,
    Mode,
    ProjectDirectory,
    ReconcileOptions,
    ReconcileReport,
    // Reconciliation
    Reconciler,
    RelativePath,
    Result,
};
