//! Scripted [`Bridge`] for engine tests
//!
//! The script lives behind an `Rc<RefCell<_>>` so a test can keep a handle and
//! change what the bridge reports between scans of the same workspace.

#![allow(dead_code)]

use fossil_navigator::core::error::{NavigatorError, Result};
use fossil_navigator::{Bridge, RepoHealth, StatusLine};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug)]
pub struct Script {
    pub health: RepoHealth,
    pub status: Vec<StatusLine>,
    pub stashes: Vec<(String, String)>,
    /// Make the status query fail with this message
    pub status_error: Option<String>,
    /// Raise the caller's cancel flag while the status query runs, like a user
    /// pressing cancel
    pub cancel_during_status: bool,
    /// Repository `ignore-glob` setting
    pub ignore_glob: Option<String>,
    /// Make the settings query fail with this message
    pub settings_error: Option<String>,
    pub status_queries: usize,
    pub stash_queries: usize,
    pub cancel_requests: usize,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            health: RepoHealth::Ok,
            status: Vec::new(),
            stashes: Vec::new(),
            status_error: None,
            cancel_during_status: false,
            ignore_glob: None,
            settings_error: None,
            status_queries: 0,
            stash_queries: 0,
            cancel_requests: 0,
        }
    }
}

impl Script {
    pub fn set_status(&mut self, lines: &[(&str, &str)]) {
        self.status = lines
            .iter()
            .map(|(keyword, path)| StatusLine::new(*keyword, *path))
            .collect();
    }

    pub fn set_stashes(&mut self, pairs: &[(&str, &str)]) {
        self.stashes = pairs
            .iter()
            .map(|(name, id)| (name.to_string(), id.to_string()))
            .collect();
    }
}

pub struct MockBridge {
    root: PathBuf,
    script: Rc<RefCell<Script>>,
}

impl MockBridge {
    /// Bridge over `root` plus the handle that controls it
    pub fn new(root: &Path) -> (Self, Rc<RefCell<Script>>) {
        let script = Rc::new(RefCell::new(Script::default()));
        let bridge = Self {
            root: root.to_path_buf(),
            script: Rc::clone(&script),
        };
        (bridge, script)
    }
}

impl Bridge for MockBridge {
    fn workspace_root(&self) -> &Path {
        &self.root
    }

    fn repository_health(&self) -> RepoHealth {
        self.script.borrow().health
    }

    fn query_status(&self, cancel: &AtomicBool) -> Result<Vec<StatusLine>> {
        let mut script = self.script.borrow_mut();
        script.status_queries += 1;
        if script.cancel_during_status {
            cancel.store(true, Ordering::SeqCst);
        }
        if let Some(message) = &script.status_error {
            return Err(NavigatorError::external_query_failed("ls -l", message.clone()));
        }
        Ok(script.status.clone())
    }

    fn query_stashes(&self, _cancel: &AtomicBool) -> Result<Vec<(String, String)>> {
        let mut script = self.script.borrow_mut();
        script.stash_queries += 1;
        Ok(script.stashes.clone())
    }

    fn query_ignore_glob(&self, _cancel: &AtomicBool) -> Result<Option<String>> {
        let script = self.script.borrow();
        if let Some(message) = &script.settings_error {
            return Err(NavigatorError::external_query_failed(
                "settings ignore-glob",
                message.clone(),
            ));
        }
        Ok(script.ignore_glob.clone())
    }

    fn project_name(&self) -> Option<String> {
        Some("mock".to_string())
    }

    fn cancel_current_operation(&self) {
        self.script.borrow_mut().cancel_requests += 1;
    }
}
