//! Console output for git-local-backup.
//!
//! A clean live run prints nothing. Dry-run prints one line per intended change,
//! prefixed with `+` (copy) or `-` (delete), and failures are printed as they
//! happen without stopping the run.

use crate::core::reconcile::Action;
use colored::*;
use std::fmt::Display;
use std::path::Path;

/// Formats and prints a fatal error message
///
/// # Format
/// ```text
///
/// ✕ Error: <message>
///
/// ```
pub fn print_error(message: &str) {
    println!("\n{} {}\n", "✕ Error:".red(), message.white());
}

/// Formats and prints a section header
pub fn print_section_header(header: &str) {
    println!("{}:\n", header.white());
}

/// Prints an intended change in dry-run mode.
///
/// Paths are printed plain so the output stays greppable.
pub fn print_planned_action(action: &Action) {
    match action {
        Action::Copy(path) => println!("+ {path}"),
        Action::Delete(path) => println!("- {path}"),
        Action::Prune(_) => {}
    }
}

/// Prints a per-file failure; the run continues after it.
pub fn print_failure(action: &Action, error: &dyn Display) {
    println!("{} Failed to {}: {}", "✕".red(), action, error);
}

/// Prints a project that was skipped because git could not be queried.
pub fn print_project_skipped(project: &Path, error: &dyn Display) {
    println!(
        "{} Skipped {}: {}. Its existing backup is kept.",
        "✕".red(),
        project.display(),
        error
    );
}
