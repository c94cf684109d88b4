use crate::core::{
    config::BackupConfig,
    error::Result,
    git::ensure_git_available,
    output::{print_project_skipped, print_section_header},
    reconcile::{ReconcileReport, Reconciler},
    relevance::{discover_projects, resolve_all},
    snapshot::BackupSnapshot,
};

/// Run one backup pass over every project under `config.projects_dir`.
///
/// Setup and discovery errors are returned. Failing projects and per-file
/// failures are printed and the run continues.
pub fn execute_backup(config: &BackupConfig) -> Result<ReconcileReport> {
    ensure_git_available()?;

    let snapshot = BackupSnapshot::capture(&config.backup_dir)?;
    let projects = discover_projects(&config.projects_dir)?;
    log::debug!(
        "Found {} projects in {}",
        projects.len(),
        config.projects_dir.display()
    );

    let relevance = resolve_all(&projects, &config.remote_branch, &config.force_include)?;
    for (project, error) in &relevance.failed {
        print_project_skipped(&project.path, error);
    }

    if config.dry_run {
        print_section_header("Simulating changes to backup directory");
    }

    let mut reconciler = Reconciler::new(
        &config.projects_dir,
        &config.backup_dir,
        snapshot,
        config.reconcile_options(),
    );
    for (project, _) in &relevance.failed {
        reconciler.retain_project(&project.name);
    }

    Ok(reconciler.run(&relevance.candidates))
}
