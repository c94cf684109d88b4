//! Project discovery and per-project candidate resolution.
//!
//! A project is a directory directly under the projects root that carries a
//! `.git` marker. For each project the resolver unions what git reports with
//! the force-included files and keys every entry by the project's name.

use crate::core::{
    error::{BackupError, Result},
    force_include::expand_force_included,
    git::GitRepo,
    paths::RelativePath,
};
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDirectory {
    pub name: OsString,
    pub path: PathBuf,
}

/// A file believed to need backing up. `path` is relative to both roots and
/// starts with the project name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub project: OsString,
    pub path: RelativePath,
}

/// Candidates across all projects plus the projects that could not be queried.
#[derive(Debug, Default)]
pub struct Relevance {
    pub candidates: Vec<CandidateFile>,
    pub failed: Vec<(ProjectDirectory, BackupError)>,
}

/// List the git projects directly under `projects_root`, sorted by name.
pub fn discover_projects(projects_root: &Path) -> Result<Vec<ProjectDirectory>> {
    let entries = std::fs::read_dir(projects_root)
        .map_err(|e| BackupError::projects_dir_unreadable(projects_root, e))?;

    let mut projects = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| BackupError::projects_dir_unreadable(projects_root, e))?;
        if !entry.file_type()?.is_dir() {
            continue;
        }

        let path = entry.path();
        match std::fs::symlink_metadata(path.join(".git")) {
            Ok(_) => projects.push(ProjectDirectory {
                name: entry.file_name(),
                path,
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("Skipping {}: not a git project", path.display());
            }
            Err(e) => return Err(e.into()),
        }
    }

    projects.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(projects)
}

/// Candidate files of one project.
///
/// Duplicates between the git lists and the force-included files are kept;
/// the reconciler's copy decision is idempotent.
pub fn resolve_project(
    project: &ProjectDirectory,
    remote: &str,
    force_include: &[RelativePath],
) -> Result<Vec<CandidateFile>> {
    let repo = GitRepo::open(&project.path)?;
    let vcs_files = repo.query_files(remote)?;
    let forced = expand_force_included(&project.path, force_include)?;

    let candidates: Vec<CandidateFile> = vcs_files
        .into_paths()
        .chain(forced)
        .map(|path| CandidateFile {
            project: project.name.clone(),
            path: path.under_project(&project.name),
        })
        .collect();

    log::debug!(
        "{}: {} candidate files",
        project.path.display(),
        candidates.len()
    );

    Ok(candidates)
}

/// Resolve every project. A project whose queries fail is recorded in
/// [`Relevance::failed`] and the others continue; a missing git executable
/// is fatal for the whole run.
pub fn resolve_all(
    projects: &[ProjectDirectory],
    remote: &str,
    force_include: &[RelativePath],
) -> Result<Relevance> {
    let mut relevance = Relevance::default();

    for project in projects {
        match resolve_project(project, remote, force_include) {
            Ok(candidates) => relevance.candidates.extend(candidates),
            Err(BackupError::GitNotFound) => return Err(BackupError::GitNotFound),
            Err(e) => {
                log::debug!("Skipping project {}: {e}", project.path.display());
                relevance.failed.push((project.clone(), e));
            }
        }
    }

    Ok(relevance)
}
