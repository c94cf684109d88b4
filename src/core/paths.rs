//! Relative paths shared between project space and backup space.
//!
//! A [`RelativePath`] is the join key of the whole tool: the same value names a
//! file below the projects root and its mirror below the backup root. Paths are
//! stored as component sequences, so `a/b` reported by git and `a\b` produced by
//! a directory walk on Windows compare equal.

use crate::core::error::{BackupError, Result};
use std::ffi::OsStr;
use std::fmt;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    /// Parse a path as printed by git, which always uses forward slashes.
    ///
    /// Returns `None` for blank or whitespace-only entries.
    pub fn from_git(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() {
            return None;
        }

        let path: PathBuf = raw.split('/').filter(|part| !part.is_empty()).collect();
        Some(Self(path))
    }

    /// Build from a path that is already relative, e.g. the result of `strip_prefix`.
    pub fn from_path(path: &Path) -> Self {
        Self(
            path.components()
                .filter(|c| !matches!(c, Component::CurDir))
                .collect(),
        )
    }

    /// Parse a user supplied force-include entry.
    ///
    /// Both separators are accepted. Absolute paths and paths that climb out of
    /// the project with `..` are rejected.
    pub fn from_user(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BackupError::invalid_force_include(raw));
        }

        let normalized = trimmed.replace('\\', "/");
        let as_path = Path::new(&normalized);
        if as_path.is_absolute() || as_path.has_root() {
            return Err(BackupError::invalid_force_include(raw));
        }

        let mut path = PathBuf::new();
        for part in normalized.split('/') {
            match part {
                "" | "." => continue,
                ".." => return Err(BackupError::invalid_force_include(raw)),
                _ => path.push(part),
            }
        }

        if path.as_os_str().is_empty() {
            return Err(BackupError::invalid_force_include(raw));
        }

        Ok(Self(path))
    }

    /// Prefix with a project directory name, producing the backup-tree key.
    pub fn under_project(&self, project: &OsStr) -> Self {
        Self(Path::new(project).join(&self.0))
    }

    /// Resolve against a root directory.
    pub fn resolve(&self, root: &Path) -> PathBuf {
        root.join(&self.0)
    }

    /// First component, which is the project directory name for backup keys.
    pub fn project_name(&self) -> Option<&OsStr> {
        self.0.components().next().map(|c| c.as_os_str())
    }

    /// The backup root itself, index 0 of a snapshot's directory list.
    pub fn is_root(&self) -> bool {
        self.0.as_os_str().is_empty()
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Expand a leading `~` to the current user's home directory.
pub fn expand_tilde(raw: &str) -> Result<PathBuf> {
    let Some(rest) = raw.strip_prefix('~') else {
        return Ok(PathBuf::from(raw));
    };

    let home = dirs::home_dir().ok_or_else(|| BackupError::HomeDirectoryNotFound {
        path: raw.to_string(),
    })?;

    let rest = rest.trim_start_matches(['/', '\\']);
    if rest.is_empty() {
        Ok(home)
    } else {
        Ok(home.join(rest))
    }
}
