//! Contract between the workspace engine and the process that talks to `fossil`.
//!
//! The engine never runs `fossil` itself. It asks a [`Bridge`] for the repository
//! health, the status listing, the stash list and the ignore-glob setting. Every
//! query receives the scan's cancel flag and must stop early once it is raised.
//! [`crate::core::fossil::FossilCli`] is the production implementation; tests script
//! their own.

use crate::core::error::Result;
use std::path::Path;
use std::sync::atomic::AtomicBool;

/// Result of probing the checkout before a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoHealth {
    Ok,
    NotFound,
    UnsupportedSchema,
}

/// One `(keyword, path)` line of the repository status listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub keyword: String,
    pub path: String,
}

impl StatusLine {
    pub fn new(keyword: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            path: path.into(),
        }
    }
}

pub trait Bridge {
    /// Root directory of the open checkout
    fn workspace_root(&self) -> &Path;

    fn repository_health(&self) -> RepoHealth;

    /// Status of every tracked file, in the order `fossil` reports them
    fn query_status(&self, cancel: &AtomicBool) -> Result<Vec<StatusLine>>;

    /// `(name, id)` pairs in reported order; names may repeat
    fn query_stashes(&self, cancel: &AtomicBool) -> Result<Vec<(String, String)>>;

    /// The repository's own `ignore-glob` setting, `None` when unset
    fn query_ignore_glob(&self, _cancel: &AtomicBool) -> Result<Option<String>> {
        Ok(None)
    }

    /// Display name of the project, once known
    fn project_name(&self) -> Option<String> {
        None
    }

    /// Ask the running query, or the next one if none is running, to stop.
    /// Returning from the query still waits for the child process to exit.
    fn cancel_current_operation(&self);
}
