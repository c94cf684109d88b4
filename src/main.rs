use clap::{CommandFactory, Parser};
use git_local_backup::commands::execute_backup;
use git_local_backup::core::{
    config::{BackupConfig, CliOverrides, FileConfig, Resolved},
    error::Result,
    print_error,
};
use std::env;
use std::path::PathBuf;

const AFTER_HELP: &str = "\
Copies every file that can be lost during an incident:
  - Committed files that are not yet pushed to the remote repository
  - Working and staged files that are not yet committed
  - Files that are not yet tracked by \"git add\"
  - Any .gitignored file included via \"--force-include\"

Only files that changed since the last backup are copied. Files that are no
longer at risk are removed from the backup directory, so point --backup-dir at
a directory used only by this tool.";

#[derive(Parser)]
#[command(name = "git-local-backup")]
#[command(about = "Copy unpushed files of local git projects to a backup directory")]
#[command(version)]
#[command(after_help = AFTER_HELP)]
struct Cli {
    /// Directory containing one git project per subdirectory (required)
    #[arg(long, value_name = "PATH")]
    projects_dir: Option<String>,

    /// Backup directory owned by this tool (required)
    #[arg(long, value_name = "PATH")]
    backup_dir: Option<String>,

    /// Remote name used to find unpushed files [default: origin]
    #[arg(long, value_name = "REMOTE")]
    remote_branch: Option<String>,

    /// Always include a git ignored file or directory like ".git" (repeatable)
    #[arg(long, value_name = "PATH")]
    force_include: Vec<String>,

    /// Preview changes without modifying the backup directory
    #[arg(long)]
    dry_run: bool,

    /// Also re-copy files whose permission bits changed
    #[arg(long)]
    compare_permissions: bool,

    /// Read settings from this JSON file instead of the default location
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            projects_dir: self.projects_dir.clone(),
            backup_dir: self.backup_dir.clone(),
            remote_branch: self.remote_branch.clone(),
            force_include: self.force_include.clone(),
            dry_run: self.dry_run,
            compare_permissions: self.compare_permissions,
        }
    }
}

fn resolve_config(cli: &Cli) -> Result<Resolved> {
    let file = FileConfig::load(cli.config.as_deref())?;
    BackupConfig::resolve(cli.overrides(), file)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Configure logging based on --debug flag
    if cli.debug {
        env::set_var("RUST_LOG", "debug");
    } else {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let config = match resolve_config(&cli) {
        Ok(Resolved::Ready(config)) => config,
        Ok(Resolved::MissingPaths(missing)) => {
            log::debug!("Missing required paths: {}", missing.join(", "));
            Cli::command().print_help()?;
            std::process::exit(2);
        }
        Err(e) => {
            print_error(&e.to_string());
            std::process::exit(1);
        }
    };

    match execute_backup(&config) {
        Ok(report) => {
            if !report.failures.is_empty() {
                log::info!("{} files could not be backed up", report.failures.len());
            }
        }
        Err(e) => {
            print_error(&e.to_string());
            std::process::exit(1);
        }
    }

    Ok(())
}
