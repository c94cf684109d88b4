//! Temporary workspaces with real git projects
//!
//! Provides a [`TestWorkspace`] with a projects root, a backup root and an
//! isolated home directory, plus helpers to drive git inside its projects.

#![allow(dead_code)]

use assert_cmd::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Test workspace. The TempDir must be kept alive for the duration of the test.
pub struct TestWorkspace {
    pub temp_dir: TempDir,
    pub projects: PathBuf,
    pub backup: PathBuf,
    pub home: PathBuf,
}

impl TestWorkspace {
    pub fn new() -> anyhow::Result<Self> {
        let temp_dir = TempDir::new()?;
        let projects = temp_dir.path().join("projects");
        let backup = temp_dir.path().join("backup");
        let home = temp_dir.path().join("home");
        fs::create_dir_all(&projects)?;
        fs::create_dir_all(&backup)?;
        fs::create_dir_all(&home)?;

        Ok(Self {
            temp_dir,
            projects,
            backup,
            home,
        })
    }

    pub fn project_path(&self, name: &str) -> PathBuf {
        self.projects.join(name)
    }

    /// Creates `name` under the projects root as a git repository on `main`
    pub fn create_project(&self, name: &str) -> anyhow::Result<PathBuf> {
        let path = self.project_path(name);
        fs::create_dir_all(&path)?;

        git(&path, &["init"])?;
        git(&path, &["symbolic-ref", "HEAD", "refs/heads/main"])?;
        git(&path, &["config", "user.name", "Test User"])?;
        git(&path, &["config", "user.email", "test@example.com"])?;
        git(&path, &["config", "commit.gpgsign", "false"])?;

        Ok(path)
    }

    /// Creates a bare repository, registers it as `origin` and pushes `main`
    pub fn push_to_new_remote(&self, project: &str) -> anyhow::Result<PathBuf> {
        let remote = self.temp_dir.path().join("remotes").join(format!("{project}.git"));
        fs::create_dir_all(&remote)?;
        git(&remote, &["init", "--bare"])?;

        let project_path = self.project_path(project);
        git(
            &project_path,
            &["remote", "add", "origin", &remote.to_string_lossy()],
        )?;
        git(&project_path, &["push", "origin", "main"])?;

        Ok(remote)
    }

    pub fn write_backup(&self, relative: &str, content: &str) -> anyhow::Result<()> {
        write_file(&self.backup, relative, content)
    }

    pub fn backup_file(&self, relative: &str) -> PathBuf {
        join_relative(&self.backup, relative)
    }

    pub fn read_backup(&self, relative: &str) -> anyhow::Result<String> {
        Ok(fs::read_to_string(self.backup_file(relative))?)
    }

    /// Every file below the backup root with its content, keyed by relative path
    pub fn backup_contents(&self) -> anyhow::Result<BTreeMap<PathBuf, Vec<u8>>> {
        let mut contents = BTreeMap::new();
        collect_files(&self.backup, &self.backup, &mut contents)?;
        Ok(contents)
    }

    /// The binary with an isolated home so no user config is picked up
    pub fn command(&self) -> anyhow::Result<Command> {
        let mut cmd = Command::cargo_bin("git-local-backup")?;
        cmd.env("HOME", &self.home)
            .env("XDG_CONFIG_HOME", self.home.join(".config"))
            .env_remove("RUST_LOG");
        Ok(cmd)
    }

    /// The binary pointed at this workspace's projects and backup roots
    pub fn backup_command(&self) -> anyhow::Result<Command> {
        let mut cmd = self.command()?;
        cmd.arg("--projects-dir")
            .arg(&self.projects)
            .arg("--backup-dir")
            .arg(&self.backup);
        Ok(cmd)
    }
}

/// Runs git in `dir` and fails on a non-zero exit
pub fn git(dir: &Path, args: &[&str]) -> anyhow::Result<()> {
    let output = Command::new("git").args(args).current_dir(dir).output()?;
    anyhow::ensure!(
        output.status.success(),
        "git {} failed: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stderr)
    );
    Ok(())
}

/// Joins a forward-slash relative path onto `root`
pub fn join_relative(root: &Path, relative: &str) -> PathBuf {
    relative
        .split('/')
        .fold(root.to_path_buf(), |path, part| path.join(part))
}

/// Writes a file, creating parent directories
pub fn write_file(root: &Path, relative: &str, content: &str) -> anyhow::Result<()> {
    let path = join_relative(root, relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

/// Writes, stages and commits a file
pub fn commit_file(project: &Path, relative: &str, content: &str) -> anyhow::Result<()> {
    write_file(project, relative, content)?;
    git(project, &["add", relative])?;
    git(project, &["commit", "-m", &format!("Add {relative}")])?;
    Ok(())
}

fn collect_files(
    root: &Path,
    dir: &Path,
    contents: &mut BTreeMap<PathBuf, Vec<u8>>,
) -> anyhow::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            collect_files(root, &path, contents)?;
        } else {
            contents.insert(path.strip_prefix(root)?.to_path_buf(), fs::read(&path)?);
        }
    }
    Ok(())
}
