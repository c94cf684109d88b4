//! Domain-specific error types for git-local-backup.
//!
//! [`BackupError`] covers the failures that abort a run (setup and discovery)
//! or a single project. Per-file copy and delete failures never surface as
//! `BackupError`; the reconciler collects them in its report instead.
//!
//! # Public API
//! - [`BackupError`]: Main error enum covering all fatal failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, BackupError>`

use std::path::PathBuf;
use thiserror::Error;

/// Domain-specific error types for git-local-backup
#[derive(Error, Debug)]
pub enum BackupError {
    // Git tool and repository errors
    #[error("git executable not found. Install git and make sure it is on your PATH")]
    GitNotFound,

    #[error("Not a git repository: {path}")]
    NotAGitRepository { path: PathBuf },

    #[error("Git repository error: {0}")]
    GitRepo(#[from] git2::Error),

    #[error("`{command}` failed in {dir}: {stderr}")]
    GitCommandFailed {
        command: String,
        dir: PathBuf,
        stderr: String,
    },

    // File system errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Cannot read projects directory '{path}': {source}")]
    ProjectsDirUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot read backup directory '{path}': {source}")]
    BackupDirUnreadable {
        path: PathBuf,
        source: walkdir::Error,
    },

    #[error("Backup directory '{path}' exists but is not a directory")]
    BackupDirNotADirectory { path: PathBuf },

    #[error("Could not determine the home directory to expand '{path}'")]
    HomeDirectoryNotFound { path: String },

    // Configuration errors
    #[error("Invalid force-include path '{path}': must be relative and stay inside the project")]
    InvalidForceInclude { path: String },

    #[error("Could not determine the configuration directory")]
    ConfigDirectoryNotFound,

    #[error("Failed to read config file '{path}': {source}")]
    ConfigReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ConfigParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results using BackupError
pub type Result<T> = std::result::Result<T, BackupError>;

impl BackupError {
    /// Create a git command failure carrying the trimmed stderr output
    pub fn git_command_failed(
        command: impl Into<String>,
        dir: impl Into<PathBuf>,
        stderr: &[u8],
    ) -> Self {
        Self::GitCommandFailed {
            command: command.into(),
            dir: dir.into(),
            stderr: String::from_utf8_lossy(stderr).trim().to_string(),
        }
    }

    /// Create a not-a-repository error
    pub fn not_a_git_repository(path: impl Into<PathBuf>) -> Self {
        Self::NotAGitRepository { path: path.into() }
    }

    /// Create a projects directory read failure
    pub fn projects_dir_unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ProjectsDirUnreadable {
            path: path.into(),
            source,
        }
    }

    /// Create a backup directory walk failure
    pub fn backup_dir_unreadable(path: impl Into<PathBuf>, source: walkdir::Error) -> Self {
        Self::BackupDirUnreadable {
            path: path.into(),
            source,
        }
    }

    /// Create a backup root that is not a directory error
    pub fn backup_dir_not_a_directory(path: impl Into<PathBuf>) -> Self {
        Self::BackupDirNotADirectory { path: path.into() }
    }

    /// Create an invalid force-include error
    pub fn invalid_force_include(path: impl Into<String>) -> Self {
        Self::InvalidForceInclude { path: path.into() }
    }

    /// Create a config read failure
    pub fn config_read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ConfigReadFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a config parse failure
    pub fn config_parse_failed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::ConfigParseFailed {
            path: path.into(),
            source,
        }
    }
}
