//! The workspace aggregate: one open checkout and everything derived from it.
//!
//! A [`Workspace`] exclusively owns the reconciled file collection, the set of
//! distinct folders, the stash index and the view state for one working
//! directory. Front-ends borrow from it; nothing is shared between workspaces.
//!
//! Mutations queue [`WorkspaceEvent`]s instead of calling back into the UI. The
//! caller drains them after each call, so a selection change is always fully
//! applied before the next [`Workspace::project`].
//!
//! Scans take `&mut self`, which rules out a second scan, or a projection, running
//! against a collection that is being replaced.

use crate::core::{
    bridge::{Bridge, RepoHealth},
    error::Result,
    file_status::StatusMask,
    progress::ProgressSink,
    projection::{self, ViewMode, ViewState},
    record::{FileMap, StatusRecord},
    scanner::{self, ScanOptions, ScanReport, Snapshot},
    stash::StashIndex,
    tree::{build_tree, PathNode},
};
use std::collections::{BTreeSet, VecDeque};
use std::path::Path;
use std::sync::atomic::AtomicBool;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanSummary {
    pub files: usize,
    pub directories: usize,
    pub stashes: usize,
    pub dropped: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    Completed(ScanSummary),
    /// The cancel flag was raised; the previous collection is untouched
    Cancelled,
    /// No open checkout; the collection is now empty
    NoWorkspace,
    /// The repository needs a rebuild; the collection is now empty
    OldSchema,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceEvent {
    Scanned(ScanSummary),
    ScanCancelled,
    Unavailable(RepoHealth),
    SelectionChanged,
    ViewModeChanged(ViewMode),
}

/// Where a bulk action takes its file names from
#[derive(Debug, Clone, Copy)]
pub enum Selection<'a> {
    /// Zero-based rows of the current file view
    Files(&'a [usize]),
    /// The folders selected in the tree, recursively
    Folders,
}

pub struct Workspace {
    bridge: Box<dyn Bridge>,
    files: FileMap,
    paths: BTreeSet<String>,
    stashes: StashIndex,
    view: ViewState,
    events: VecDeque<WorkspaceEvent>,
}

impl Workspace {
    pub fn new(bridge: Box<dyn Bridge>) -> Self {
        let mut view = ViewState::default();
        view.select_root();
        Self {
            bridge,
            files: FileMap::new(),
            paths: BTreeSet::new(),
            stashes: StashIndex::new(),
            view,
            events: VecDeque::new(),
        }
    }

    pub fn root(&self) -> &Path {
        self.bridge.workspace_root()
    }

    pub fn bridge(&self) -> &dyn Bridge {
        self.bridge.as_ref()
    }

    /// Rescan the checkout and replace the collection.
    ///
    /// On cancellation or a failed fossil query the current collection is kept
    /// as it was. A missing checkout or an outdated repository empties it.
    pub fn scan_workspace(
        &mut self,
        options: &ScanOptions,
        progress: &mut dyn ProgressSink,
        cancel: &AtomicBool,
    ) -> Result<ScanOutcome> {
        let report = scanner::scan(self.bridge.as_ref(), options, progress, cancel)?;

        let outcome = match report {
            ScanReport::Completed(snapshot) => {
                let summary = self.apply(snapshot);
                self.events.push_back(WorkspaceEvent::Scanned(summary));
                ScanOutcome::Completed(summary)
            }
            ScanReport::Cancelled => {
                log::info!("Scan cancelled, keeping {} files", self.files.len());
                self.events.push_back(WorkspaceEvent::ScanCancelled);
                ScanOutcome::Cancelled
            }
            ScanReport::Unavailable(health) => {
                self.clear();
                self.events.push_back(WorkspaceEvent::Unavailable(health));
                match health {
                    RepoHealth::UnsupportedSchema => ScanOutcome::OldSchema,
                    _ => ScanOutcome::NoWorkspace,
                }
            }
        };

        Ok(outcome)
    }

    fn apply(&mut self, snapshot: Snapshot) -> ScanSummary {
        let summary = ScanSummary {
            files: snapshot.files.len(),
            directories: snapshot.paths.len(),
            stashes: snapshot.stashes.len(),
            dropped: snapshot.dropped.len(),
        };

        self.files = snapshot.files;
        self.paths = snapshot.paths;
        self.stashes = snapshot.stashes;
        self.prune_selection();

        summary
    }

    /// Drop selected folders that the last scan no longer produced
    fn prune_selection(&mut self) {
        let kept: Vec<String> = self
            .view
            .selected_dirs()
            .iter()
            .filter(|dir| dir.is_empty() || self.tree_contains(dir))
            .cloned()
            .collect();
        if self.view.select_dirs(kept) {
            self.events.push_back(WorkspaceEvent::SelectionChanged);
        }
    }

    fn tree_contains(&self, dir: &str) -> bool {
        self.paths
            .iter()
            .any(|p| p == dir || (p.starts_with(dir) && p[dir.len()..].starts_with('/')))
    }

    /// Forget every file, folder and stash
    pub fn clear(&mut self) {
        self.files.clear();
        self.paths.clear();
        self.stashes = StashIndex::new();
    }

    /// Reload only the stash list
    pub fn refresh_stashes(&mut self, cancel: &AtomicBool) -> Result<()> {
        let mut stashes = StashIndex::new();
        stashes.refresh(self.bridge.as_ref(), cancel)?;
        self.stashes = stashes;
        Ok(())
    }

    pub fn files(&self) -> &FileMap {
        &self.files
    }

    /// Distinct folder paths of the current collection, `""` included when the
    /// root holds files
    pub fn paths(&self) -> &BTreeSet<String> {
        &self.paths
    }

    pub fn stashes(&self) -> &StashIndex {
        &self.stashes
    }

    /// Folder tree of the current collection, children sorted by name
    pub fn tree(&self) -> PathNode {
        let mut tree = build_tree(&self.paths);
        tree.sort();
        tree
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        if self.view.mode != mode {
            self.view.mode = mode;
            self.events.push_back(WorkspaceEvent::ViewModeChanged(mode));
        }
    }

    pub fn select_dirs<I, S>(&mut self, dirs: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.view.select_dirs(dirs) {
            self.events.push_back(WorkspaceEvent::SelectionChanged);
        }
    }

    /// Records the file view shows for the current view state
    pub fn project(&self) -> Vec<&StatusRecord> {
        projection::project(&self.files, self.view.mode, self.view.selected_dirs())
    }

    /// File names a bulk action should operate on
    pub fn selection_filenames(
        &self,
        selection: Selection<'_>,
        mask: StatusMask,
        all_if_empty: bool,
    ) -> Vec<String> {
        match selection {
            Selection::Files(rows) => {
                let visible = self.project();
                projection::file_view_selection(&visible, rows, mask, all_if_empty)
            }
            Selection::Folders => projection::dir_view_selection(
                &self.files,
                self.view.selected_dirs(),
                mask,
                all_if_empty,
            ),
        }
    }

    /// Stash names a stash action should operate on
    pub fn stash_selection<S: AsRef<str>>(&self, selected: &[S], all_if_empty: bool) -> Vec<String> {
        self.stashes.selection(selected, all_if_empty)
    }

    pub fn all_filenames(&self, mask: StatusMask) -> Vec<String> {
        projection::all_filenames(&self.files, mask)
    }

    /// Take every event queued since the last call, oldest first
    pub fn drain_events(&mut self) -> Vec<WorkspaceEvent> {
        self.events.drain(..).collect()
    }
}
