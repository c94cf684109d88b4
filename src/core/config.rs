//! Run configuration: an optional JSON file merged with command-line values.
//!
//! ```json
//! {
//!   "projects_dir": "~/Projects",
//!   "backup_dir": "~/Dropbox/ProjectsBackup",
//!   "remote_branch": "origin",
//!   "force_include": [".git", ".env"],
//!   "compare_permissions": false
//! }
//! ```

use crate::core::dirs::default_config_file;
use crate::core::error::{BackupError, Result};
use crate::core::paths::{expand_tilde, RelativePath};
use crate::core::reconcile::{Mode, ReconcileOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_REMOTE: &str = "origin";

/// Contents of `config.json`. Every field is optional.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct FileConfig {
    pub projects_dir: Option<String>,
    pub backup_dir: Option<String>,
    pub remote_branch: Option<String>,
    pub force_include: Vec<String>,
    pub compare_permissions: bool,
}

impl FileConfig {
    /// Load the config file.
    ///
    /// With an explicit path the file must exist. Without one the default
    /// location is tried and a missing file means "no configuration".
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let (path, required) = match explicit {
            Some(path) => (path.to_path_buf(), true),
            None => match default_config_file() {
                Ok(path) => (path, false),
                Err(e) => {
                    log::debug!("No default config location: {e}");
                    return Ok(Self::default());
                }
            },
        };

        if !required && !path.exists() {
            log::debug!("No config file at {}", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|e| BackupError::config_read_failed(&path, e))?;
        let config = serde_json::from_str(&content)
            .map_err(|e| BackupError::config_parse_failed(&path, e))?;

        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}

/// Values given on the command line; `None` and empty mean "not given".
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub projects_dir: Option<String>,
    pub backup_dir: Option<String>,
    pub remote_branch: Option<String>,
    pub force_include: Vec<String>,
    pub dry_run: bool,
    pub compare_permissions: bool,
}

/// Fully resolved settings for one backup run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupConfig {
    pub projects_dir: PathBuf,
    pub backup_dir: PathBuf,
    pub remote_branch: String,
    pub force_include: Vec<RelativePath>,
    pub dry_run: bool,
    pub compare_permissions: bool,
}

/// Outcome of merging: either a runnable config or the names of missing paths.
#[derive(Debug)]
pub enum Resolved {
    Ready(BackupConfig),
    MissingPaths(Vec<&'static str>),
}

impl BackupConfig {
    /// Merge CLI values over the config file. Force-include lists are
    /// concatenated, config entries first.
    pub fn resolve(cli: CliOverrides, file: FileConfig) -> Result<Resolved> {
        let projects_dir = cli
            .projects_dir
            .or(file.projects_dir)
            .filter(|p| !p.trim().is_empty());
        let backup_dir = cli
            .backup_dir
            .or(file.backup_dir)
            .filter(|p| !p.trim().is_empty());

        let (projects_dir, backup_dir) = match (projects_dir, backup_dir) {
            (Some(projects_dir), Some(backup_dir)) => (projects_dir, backup_dir),
            (projects_dir, backup_dir) => {
                let mut missing = Vec::new();
                if projects_dir.is_none() {
                    missing.push("--projects-dir");
                }
                if backup_dir.is_none() {
                    missing.push("--backup-dir");
                }
                return Ok(Resolved::MissingPaths(missing));
            }
        };

        let force_include = file
            .force_include
            .iter()
            .chain(cli.force_include.iter())
            .map(|entry| RelativePath::from_user(entry))
            .collect::<Result<Vec<_>>>()?;

        Ok(Resolved::Ready(BackupConfig {
            projects_dir: expand_tilde(&projects_dir)?,
            backup_dir: expand_tilde(&backup_dir)?,
            remote_branch: cli
                .remote_branch
                .or(file.remote_branch)
                .unwrap_or_else(|| DEFAULT_REMOTE.to_string()),
            force_include,
            dry_run: cli.dry_run,
            compare_permissions: cli.compare_permissions || file.compare_permissions,
        }))
    }

    pub fn reconcile_options(&self) -> ReconcileOptions {
        ReconcileOptions {
            mode: if self.dry_run { Mode::DryRun } else { Mode::Live },
            compare_permissions: self.compare_permissions,
        }
    }
}
