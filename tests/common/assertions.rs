//! Assertion helpers for git-local-backup output

#![allow(dead_code)]

use predicates::prelude::*;
use std::path::Path;

/// The path as the binary prints it, with the platform separator
pub fn display_path(relative: &str) -> String {
    relative
        .split('/')
        .fold(Path::new("").to_path_buf(), |path, part| path.join(part))
        .display()
        .to_string()
}

/// Dry-run line announcing a copy
pub fn plans_copy(relative: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("+ {}\n", display_path(relative)))
}

/// Dry-run line announcing a delete
pub fn plans_delete(relative: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("- {}\n", display_path(relative)))
}

/// Dry-run header
pub fn simulating() -> impl Predicate<str> {
    predicates::str::contains("Simulating changes to backup directory")
}

/// Help text printed when a required path is missing
pub fn usage() -> impl Predicate<str> {
    predicates::str::contains("Usage").and(predicates::str::contains("--projects-dir"))
}

/// Lines of dry-run output that announce a change
pub fn planned_lines(stdout: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(stdout)
        .lines()
        .filter(|line| line.starts_with("+ ") || line.starts_with("- "))
        .map(str::to_string)
        .collect()
}
