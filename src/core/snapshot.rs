//! One-shot snapshot of the existing backup tree.

use crate::core::{
    error::{BackupError, Result},
    paths::RelativePath,
};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

/// Files and directories present in the backup tree when the run started.
///
/// `dirs` is in pre-order: the backup root is at index 0 and every directory
/// appears before its children.
#[derive(Debug, Default, Clone)]
pub struct BackupSnapshot {
    pub files: HashSet<RelativePath>,
    pub dirs: Vec<RelativePath>,
}

impl BackupSnapshot {
    /// Walk `backup_root` once. Symbolic links are recorded, never followed.
    ///
    /// A root that does not exist yet yields an empty snapshot holding only the
    /// root entry. A root that is not a directory and any walk error are fatal.
    pub fn capture(backup_root: &Path) -> Result<Self> {
        let mut snapshot = BackupSnapshot::default();

        match fs::metadata(backup_root) {
            Ok(metadata) if metadata.is_dir() => {}
            Ok(_) => return Err(BackupError::backup_dir_not_a_directory(backup_root)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!(
                    "Backup directory {} does not exist yet",
                    backup_root.display()
                );
                snapshot.dirs.push(RelativePath::from_path(Path::new("")));
                return Ok(snapshot);
            }
            Err(e) => return Err(e.into()),
        }

        for entry in WalkDir::new(backup_root)
            .follow_links(false)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| BackupError::backup_dir_unreadable(backup_root, e))?;

            let Ok(relative) = entry.path().strip_prefix(backup_root) else {
                continue;
            };
            let relative = RelativePath::from_path(relative);

            if entry.file_type().is_dir() {
                snapshot.dirs.push(relative);
            } else {
                snapshot.files.insert(relative);
            }
        }

        log::debug!(
            "Backup snapshot: {} files, {} directories",
            snapshot.files.len(),
            snapshot.dirs.len()
        );

        Ok(snapshot)
    }
}
