//! Centralized initialization for commands that need a scanned workspace.
//!
//! Every command follows the same steps, so they live here:
//! 1. **Configuration**: Load the user config and apply one-off overrides
//! 2. **Checkout discovery**: Find the checkout root at or above the start directory
//! 3. **Scan**: Reconcile the workspace, turning a missing checkout or an outdated
//!    repository into an error the CLI can print

use crate::core::{
    config::NavigatorConfig,
    error::{NavigatorError, Result},
    fossil::{find_checkout_root, FossilCli},
    progress::LogProgress,
    projection::ViewMode,
    workspace::{ScanOutcome, ScanSummary, Workspace},
};
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;

/// Per-run overrides of the saved view filters. `None` keeps the saved value.
#[derive(Debug, Clone, Default)]
pub struct FilterOverrides {
    pub unknown: Option<bool>,
    pub ignored: Option<bool>,
    pub modified: Option<bool>,
    pub unchanged: Option<bool>,
    pub as_list: Option<bool>,
    pub ignore_glob: Option<String>,
}

impl FilterOverrides {
    pub fn apply(&self, config: &mut NavigatorConfig) {
        let view = &mut config.view;
        if let Some(v) = self.unknown {
            view.unknown = v;
        }
        if let Some(v) = self.ignored {
            view.ignored = v;
        }
        if let Some(v) = self.modified {
            view.modified = v;
        }
        if let Some(v) = self.unchanged {
            view.unchanged = v;
        }
        if let Some(v) = self.as_list {
            view.as_list = v;
        }
        if let Some(glob) = &self.ignore_glob {
            config.ignore_glob = glob.clone();
        }
    }
}

/// Everything a command needs after a successful scan
pub struct WorkspaceCommandContext {
    pub workspace: Workspace,
    pub config: NavigatorConfig,
    pub summary: ScanSummary,
    pub project_name: Option<String>,
}

pub struct WorkspaceCommandInit;

impl WorkspaceCommandInit {
    /// Load config, open the checkout containing `start_dir` (or the current
    /// directory) and scan it
    pub fn initialize(
        start_dir: Option<PathBuf>,
        fossil_path: Option<PathBuf>,
        overrides: &FilterOverrides,
    ) -> Result<WorkspaceCommandContext> {
        let mut config = NavigatorConfig::load().unwrap_or_else(|e| {
            log::warn!("Ignoring unreadable config: {e}");
            NavigatorConfig::default()
        });
        overrides.apply(&mut config);
        if let Some(path) = fossil_path {
            config.fossil_path = path;
        }

        let start_dir = match start_dir {
            Some(dir) => dir,
            None => std::env::current_dir()?,
        };
        let root = find_checkout_root(&start_dir).unwrap_or_else(|| start_dir.clone());
        log::debug!("Using workspace root {}", root.display());

        Self::scan(FossilCli::new(&config.fossil_path, root), config)
    }

    /// Scan the checkout behind `bridge` with the filters of `config`
    pub fn scan(bridge: FossilCli, config: NavigatorConfig) -> Result<WorkspaceCommandContext> {
        let mut workspace = Workspace::new(Box::new(bridge));
        workspace.set_view_mode(config.view_mode());
        if config.view_mode() == ViewMode::List {
            workspace.select_dirs(Vec::<String>::new());
        }

        let cancel = AtomicBool::new(false);
        let mut progress = LogProgress::default();
        let outcome = workspace.scan_workspace(&config.scan_options(), &mut progress, &cancel)?;
        workspace.drain_events();

        let summary = match outcome {
            ScanOutcome::Completed(summary) => summary,
            ScanOutcome::NoWorkspace => return Err(NavigatorError::RepositoryUnavailable),
            ScanOutcome::OldSchema => return Err(NavigatorError::SchemaUnsupported),
            ScanOutcome::Cancelled => return Err(NavigatorError::Cancelled),
        };

        Ok(WorkspaceCommandContext {
            project_name: workspace.bridge().project_name(),
            workspace,
            config,
            summary,
        })
    }
}
