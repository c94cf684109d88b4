//! Git queries for a single project.
//!
//! [`GitRepo`] answers the three questions the backup needs from version control:
//! which files are untracked, which tracked files carry uncommitted changes, and
//! which files differ from the remote counterpart of the current branch. Listing
//! goes through the `git` executable with the project as its working directory;
//! branch and remote-ref lookups go through `git2`. Nothing here mutates the
//! working tree or the process working directory.

use crate::core::{
    error::{BackupError, Result},
    paths::RelativePath,
};
use git2::{ErrorCode, Repository};
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Fail with [`BackupError::GitNotFound`] unless a `git` executable can be spawned.
pub fn ensure_git_available() -> Result<()> {
    match Command::new("git").arg("--version").output() {
        Ok(output) if output.status.success() => {
            log::debug!("{}", String::from_utf8_lossy(&output.stdout).trim());
            Ok(())
        }
        Ok(output) => Err(BackupError::git_command_failed(
            "git --version",
            std::env::current_dir().unwrap_or_default(),
            &output.stderr,
        )),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(BackupError::GitNotFound),
        Err(e) => Err(BackupError::Io(e)),
    }
}

/// Files git reports as at risk of loss, relative to the repository root.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct VcsFiles {
    pub untracked: Vec<RelativePath>,
    pub uncommitted: Vec<RelativePath>,
    pub unpushed: Vec<RelativePath>,
}

impl VcsFiles {
    pub fn into_paths(self) -> impl Iterator<Item = RelativePath> {
        self.untracked
            .into_iter()
            .chain(self.uncommitted)
            .chain(self.unpushed)
    }
}

pub struct GitRepo {
    repo: Repository,
    workdir: PathBuf,
}

impl GitRepo {
    /// Open the repository rooted exactly at `path`, without searching parents.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Repository::open(path).map_err(|e| match e.code() {
            ErrorCode::NotFound => BackupError::not_a_git_repository(path),
            _ => BackupError::GitRepo(e),
        })?;

        let workdir = repo
            .workdir()
            .map(Path::to_path_buf)
            .ok_or_else(|| BackupError::not_a_git_repository(path))?;

        Ok(GitRepo { repo, workdir })
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Run `git --no-pager <args>` in the working directory and return stdout.
    fn execute_git_command(&self, args: &[&str]) -> Result<Vec<u8>> {
        let mut cmd = Command::new("git");
        cmd.arg("--no-pager").args(args).current_dir(&self.workdir);

        let output = cmd.output().map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => BackupError::GitNotFound,
            _ => BackupError::Io(e),
        })?;

        if !output.status.success() {
            return Err(BackupError::git_command_failed(
                format!("git {}", args.join(" ")),
                &self.workdir,
                &output.stderr,
            ));
        }

        Ok(output.stdout)
    }

    /// Untracked files that are not excluded by `.gitignore` and friends.
    pub fn list_untracked(&self) -> Result<Vec<RelativePath>> {
        let stdout = self.execute_git_command(&[
            "ls-files",
            "-z",
            "--exclude-standard",
            "--others",
            "--full-name",
        ])?;
        Ok(parse_nul_separated(&stdout))
    }

    /// Current branch name, `None` when HEAD is detached.
    ///
    /// An unborn branch (no commits yet) still has a name.
    pub fn current_branch(&self) -> Result<Option<String>> {
        let head = self.repo.find_reference("HEAD")?;

        Ok(head.symbolic_target().map(|target| {
            target
                .strip_prefix("refs/heads/")
                .unwrap_or(target)
                .to_string()
        }))
    }

    fn has_commits(&self) -> bool {
        self.repo.head().map(|head| head.target().is_some()).unwrap_or(false)
    }

    fn remote_branch_exists(&self, remote: &str, branch: &str) -> Result<bool> {
        match self
            .repo
            .find_reference(&format!("refs/remotes/{remote}/{branch}"))
        {
            Ok(_) => Ok(true),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(false),
            Err(e) => Err(BackupError::GitRepo(e)),
        }
    }

    /// Tracked files whose working copy or index differs from HEAD.
    ///
    /// Without any commit every staged file is uncommitted.
    pub fn list_uncommitted(&self) -> Result<Vec<RelativePath>> {
        if !self.has_commits() {
            let stdout = self.execute_git_command(&["ls-files", "-z", "--cached"])?;
            return Ok(parse_nul_separated(&stdout));
        }

        let stdout = self.execute_git_command(&["diff", "-z", "--name-only", "HEAD"])?;
        Ok(parse_nul_separated(&stdout))
    }

    /// Files that differ between the working tree and `<remote>/<branch>`.
    ///
    /// Empty when HEAD is detached or the branch was never pushed.
    pub fn list_unpushed(&self, remote: &str) -> Result<Vec<RelativePath>> {
        let Some(branch) = self.current_branch()? else {
            log::debug!("{}: detached HEAD, no unpushed files", self.workdir.display());
            return Ok(Vec::new());
        };

        if !self.remote_branch_exists(remote, &branch)? {
            log::debug!(
                "{}: no upstream {remote}/{branch}, no unpushed files",
                self.workdir.display()
            );
            return Ok(Vec::new());
        }

        let target = format!("{remote}/{branch}");
        let stdout = self.execute_git_command(&["diff", "-z", "--name-only", &target, "--"])?;
        Ok(parse_nul_separated(&stdout))
    }

    /// Everything git knows to be at risk of loss in this project.
    pub fn query_files(&self, remote: &str) -> Result<VcsFiles> {
        Ok(VcsFiles {
            untracked: self.list_untracked()?,
            uncommitted: self.list_uncommitted()?,
            unpushed: self.list_unpushed(remote)?,
        })
    }
}

fn parse_nul_separated(stdout: &[u8]) -> Vec<RelativePath> {
    stdout
        .split(|&b| b == 0)
        .filter_map(|entry| RelativePath::from_git(&String::from_utf8_lossy(entry)))
        .collect()
}
