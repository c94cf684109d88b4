//! Predefined project scenarios
//!
//! Each scenario leaves the workspace in a known state so tests only need to
//! run the binary and check the backup directory.

#![allow(dead_code)]

use super::repository::*;

/// Scenario: project `app` with untracked `notes.txt` ("a") and a backup that
/// holds a stale `notes.txt` ("b") and an `old.txt` the project no longer has
pub fn create_stale_backup_workspace() -> anyhow::Result<TestWorkspace> {
    let ws = TestWorkspace::new()?;
    let app = ws.create_project("app")?;

    write_file(&app, "notes.txt", "a")?;
    ws.write_backup("app/notes.txt", "b")?;
    ws.write_backup("app/old.txt", "old")?;

    Ok(ws)
}

/// Scenario: project `app` pushed to a bare remote, then one more local commit
/// and an uncommitted edit on top
pub fn create_unpushed_workspace() -> anyhow::Result<TestWorkspace> {
    let ws = TestWorkspace::new()?;
    let app = ws.create_project("app")?;

    commit_file(&app, "pushed.txt", "safe on the remote")?;
    commit_file(&app, "tracked.txt", "v1")?;
    ws.push_to_new_remote("app")?;

    commit_file(&app, "src/local.rs", "fn local() {}")?;
    write_file(&app, "tracked.txt", "v2")?;

    Ok(ws)
}

/// Scenario: several projects in different states plus a plain directory
pub fn create_mixed_workspace() -> anyhow::Result<TestWorkspace> {
    let ws = TestWorkspace::new()?;

    let app = ws.create_project("app")?;
    commit_file(&app, "README.md", "# app")?;
    write_file(&app, "draft.md", "draft")?;
    write_file(&app, "docs/guide.md", "guide")?;

    let lib = ws.create_project("lib")?;
    write_file(&lib, ".gitignore", "target/\n.env\n")?;
    write_file(&lib, ".env", "TOKEN=secret")?;
    write_file(&lib, "target/debug/lib.o", "binary")?;
    write_file(&lib, "src/lib.rs", "pub fn lib() {}")?;

    write_file(&ws.projects, "scratch/notes.txt", "not a git project")?;

    Ok(ws)
}
