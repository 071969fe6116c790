//! Common assertion helpers for test output validation

#![allow(dead_code)]

use fossil_navigator::{FileStatus, StatusRecord, Workspace};
use predicates::prelude::*;

/// Creates a predicate that checks for the missing checkout message
pub fn not_in_workspace() -> impl Predicate<str> {
    predicates::str::contains("Not in a fossil workspace")
}

/// Creates a predicate that checks for numbered file rows
pub fn has_file_index(index: u32) -> impl Predicate<str> {
    predicates::str::contains(format!("[{index}]"))
}

/// Creates a predicate that checks for a status description
pub fn has_status(status: &str) -> impl Predicate<str> {
    predicates::str::contains(status.to_string())
}

/// Status of the record at `full_path`, if the workspace holds one
pub fn status_of(workspace: &Workspace, full_path: &str) -> Option<FileStatus> {
    workspace.files().get(full_path).map(StatusRecord::status)
}

/// Full paths of the records a projection returned
pub fn full_paths(records: &[&StatusRecord]) -> Vec<String> {
    records.iter().map(|r| r.full_path()).collect()
}
