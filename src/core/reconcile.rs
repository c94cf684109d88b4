//! The reconciliation engine.
//!
//! [`Reconciler`] brings the backup tree in line with the candidate files in three
//! strictly ordered passes:
//!
//! 1. **Copy**: every candidate whose source still exists claims its backup path
//!    (removing it from the pending-deletion set) and is copied when the backup
//!    copy is missing or differs.
//! 2. **Delete**: whatever is still pending deletion was not claimed by any
//!    candidate and is removed.
//! 3. **Prune**: directories from the snapshot are removed deepest-first when
//!    empty. The backup root is never removed.
//!
//! Dry-run shares every decision with a live run; only [`Reconciler::apply`]
//! differs, printing the action instead of performing it. Per-file failures are
//! printed, recorded in the [`ReconcileReport`] and never abort the run.

use crate::core::{
    output::{print_failure, print_planned_action},
    paths::RelativePath,
    relevance::CandidateFile,
    snapshot::BackupSnapshot,
    transfer::{copy_file, files_identical, permissions_match},
};
use std::collections::HashSet;
use std::ffi::OsStr;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Live,
    DryRun,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ReconcileOptions {
    pub mode: Mode,
    /// Re-copy files whose content matches but whose permission bits drifted.
    pub compare_permissions: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    Copy(RelativePath),
    Delete(RelativePath),
    Prune(RelativePath),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Copy(path) => write!(f, "copy {path}"),
            Action::Delete(path) => write!(f, "delete {path}"),
            Action::Prune(path) => write!(f, "remove directory {path}"),
        }
    }
}

#[derive(Debug)]
pub struct Failure {
    pub action: Action,
    pub error: io::Error,
}

/// Outcome of one reconciliation. In dry-run mode `copied` and `deleted` hold
/// the intended actions.
#[derive(Debug, Default)]
pub struct ReconcileReport {
    pub copied: Vec<RelativePath>,
    pub deleted: Vec<RelativePath>,
    pub pruned: Vec<RelativePath>,
    pub unchanged: usize,
    pub vanished: usize,
    pub failures: Vec<Failure>,
}

impl ReconcileReport {
    fn record(&mut self, action: Action) {
        match action {
            Action::Copy(path) => self.copied.push(path),
            Action::Delete(path) => self.deleted.push(path),
            Action::Prune(path) => self.pruned.push(path),
        }
    }

    /// True when the backup tree needed no copy or delete at all.
    pub fn is_noop(&self) -> bool {
        self.copied.is_empty() && self.deleted.is_empty() && self.failures.is_empty()
    }
}

pub struct Reconciler<'a> {
    projects_root: &'a Path,
    backup_root: &'a Path,
    options: ReconcileOptions,
    pending_deletion: HashSet<RelativePath>,
    dirs: Vec<RelativePath>,
    report: ReconcileReport,
}

impl<'a> Reconciler<'a> {
    pub fn new(
        projects_root: &'a Path,
        backup_root: &'a Path,
        snapshot: BackupSnapshot,
        options: ReconcileOptions,
    ) -> Self {
        Self {
            projects_root,
            backup_root,
            options,
            pending_deletion: snapshot.files,
            dirs: snapshot.dirs,
            report: ReconcileReport::default(),
        }
    }

    /// Keep every backed-up file of `project` out of the delete pass.
    pub fn retain_project(&mut self, project: &OsStr) {
        let before = self.pending_deletion.len();
        self.pending_deletion
            .retain(|path| path.project_name() != Some(project));
        log::debug!(
            "Retaining {} backed-up files of {}",
            before - self.pending_deletion.len(),
            project.to_string_lossy()
        );
    }

    pub fn run(mut self, candidates: &[CandidateFile]) -> ReconcileReport {
        self.copy_pass(candidates);
        self.delete_pass();
        self.prune_pass();

        log::debug!(
            "Reconciled: {} copied, {} unchanged, {} vanished, {} deleted, {} pruned, {} failed",
            self.report.copied.len(),
            self.report.unchanged,
            self.report.vanished,
            self.report.deleted.len(),
            self.report.pruned.len(),
            self.report.failures.len()
        );

        self.report
    }

    fn copy_pass(&mut self, candidates: &[CandidateFile]) {
        let mut seen = HashSet::new();

        for candidate in candidates {
            if !seen.insert(&candidate.path) {
                continue;
            }

            let source = candidate.path.resolve(self.projects_root);
            match fs::metadata(&source) {
                Ok(metadata) if metadata.is_dir() => {
                    log::debug!("Skipping directory candidate {}", candidate.path);
                    continue;
                }
                Ok(_) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    // Reported by git but deleted since; the delete pass handles its backup.
                    log::debug!(
                        "Skipping {} from {}: source no longer exists",
                        candidate.path,
                        candidate.project.to_string_lossy()
                    );
                    self.report.vanished += 1;
                    continue;
                }
                Err(e) => {
                    self.fail(Action::Copy(candidate.path.clone()), e);
                    continue;
                }
            }

            let claimed = self.pending_deletion.remove(&candidate.path);
            if claimed && !self.differs(&source, &candidate.path) {
                log::debug!("Unchanged {}", candidate.path);
                self.report.unchanged += 1;
                continue;
            }

            self.apply(Action::Copy(candidate.path.clone()));
        }
    }

    fn differs(&self, source: &Path, path: &RelativePath) -> bool {
        let backup = path.resolve(self.backup_root);

        match files_identical(source, &backup) {
            Ok(true) => {}
            Ok(false) => return true,
            Err(e) => {
                log::debug!("Cannot compare {path}, copying it: {e}");
                return true;
            }
        }

        if !self.options.compare_permissions {
            return false;
        }

        match permissions_match(source, &backup) {
            Ok(matches) => !matches,
            Err(e) => {
                log::debug!("Cannot compare permissions of {path}, copying it: {e}");
                true
            }
        }
    }

    fn delete_pass(&mut self) {
        let mut stale: Vec<RelativePath> = self.pending_deletion.drain().collect();
        stale.sort();

        for path in stale {
            self.apply(Action::Delete(path));
        }
    }

    fn prune_pass(&mut self) {
        if self.options.mode == Mode::DryRun {
            return;
        }

        // Index 0 is the backup root; reverse pre-order visits children first.
        let dirs: Vec<RelativePath> = self.dirs.iter().skip(1).rev().cloned().collect();
        for dir in dirs {
            if dir.is_root() {
                continue;
            }
            self.apply(Action::Prune(dir));
        }
    }

    /// Perform `action`, or only print it in dry-run mode.
    fn apply(&mut self, action: Action) {
        match self.options.mode {
            Mode::DryRun => print_planned_action(&action),
            Mode::Live => match self.perform(&action) {
                Ok(true) => log::debug!("Done: {action}"),
                Ok(false) => return,
                Err(e) => {
                    self.fail(action, e);
                    return;
                }
            },
        }

        self.report.record(action);
    }

    /// Returns `Ok(false)` when there was nothing to do.
    fn perform(&self, action: &Action) -> io::Result<bool> {
        match action {
            Action::Copy(path) => {
                copy_file(
                    &path.resolve(self.projects_root),
                    &path.resolve(self.backup_root),
                )?;
                Ok(true)
            }
            Action::Delete(path) => match fs::remove_file(path.resolve(self.backup_root)) {
                Ok(()) => Ok(true),
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
                Err(e) => Err(e),
            },
            Action::Prune(path) => match fs::remove_dir(path.resolve(self.backup_root)) {
                Ok(()) => Ok(true),
                Err(e)
                    if matches!(
                        e.kind(),
                        io::ErrorKind::DirectoryNotEmpty | io::ErrorKind::NotFound
                    ) =>
                {
                    Ok(false)
                }
                Err(e) => Err(e),
            },
        }
    }

    fn fail(&mut self, action: Action, error: io::Error) {
        log::debug!("Failed to {action}: {error}");
        print_failure(&action, &error);
        self.report.failures.push(Failure { action, error });
    }
}
