//! Shared test utilities for git-local-backup
//!
//! Integration tests build a temporary projects root holding real git
//! repositories next to a backup root, then run the binary against both.

pub mod assertions;
pub mod fixtures;
pub mod repository;
