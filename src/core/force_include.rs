//! Expansion of force-included paths into concrete project files.
//!
//! Force-include entries bypass git's ignore rules. The same list applies to
//! every project, so entries that do not exist in a given project are skipped.

use crate::core::{error::Result, paths::RelativePath};
use std::io;
use std::path::Path;
use walkdir::WalkDir;

/// Expand `entries` into the regular files they name inside `project_dir`.
///
/// A file entry is returned as-is, a directory entry contributes every regular
/// file beneath it, and a missing entry contributes nothing.
pub fn expand_force_included(
    project_dir: &Path,
    entries: &[RelativePath],
) -> Result<Vec<RelativePath>> {
    let mut files = Vec::new();

    for entry in entries {
        let path = entry.resolve(project_dir);

        let metadata = match std::fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
            Err(e) => return Err(e.into()),
        };

        if !metadata.is_dir() {
            files.push(entry.clone());
            continue;
        }

        for walked in WalkDir::new(&path).sort_by_file_name() {
            let walked = walked?;
            if !walked.file_type().is_file() {
                continue;
            }

            if let Ok(relative) = walked.path().strip_prefix(project_dir) {
                files.push(RelativePath::from_path(relative));
            }
        }
    }

    log::debug!(
        "{}: {} force-included files",
        project_dir.display(),
        files.len()
    );

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn rel(path: &str) -> RelativePath {
        RelativePath::from_git(path).unwrap()
    }

    #[test]
    fn test_file_entry_is_kept() -> Result<()> {
        let project = TempDir::new()?;
        fs::write(project.path().join(".env"), "SECRET=1")?;

        let files = expand_force_included(project.path(), &[rel(".env")])?;
        assert_eq!(files, vec![rel(".env")]);
        Ok(())
    }

    #[test]
    fn test_directory_entry_is_expanded_recursively() -> Result<()> {
        let project = TempDir::new()?;
        let git_dir = project.path().join(".git");
        fs::create_dir_all(git_dir.join("refs").join("heads"))?;
        fs::create_dir_all(git_dir.join("objects"))?;
        fs::write(git_dir.join("HEAD"), "ref: refs/heads/main\n")?;
        fs::write(git_dir.join("refs").join("heads").join("main"), "abc\n")?;

        let files = expand_force_included(project.path(), &[rel(".git")])?;
        assert_eq!(files, vec![rel(".git/HEAD"), rel(".git/refs/heads/main")]);
        Ok(())
    }

    #[test]
    fn test_missing_entries_are_skipped() -> Result<()> {
        let project = TempDir::new()?;
        fs::write(project.path().join("present.txt"), "here")?;

        let files =
            expand_force_included(project.path(), &[rel("absent"), rel("present.txt")])?;
        assert_eq!(files, vec![rel("present.txt")]);
        Ok(())
    }

    #[test]
    fn test_empty_directory_contributes_nothing() -> Result<()> {
        let project = TempDir::new()?;
        fs::create_dir_all(project.path().join("cache"))?;

        let files = expand_force_included(project.path(), &[rel("cache")])?;
        assert!(files.is_empty());
        Ok(())
    }
}
