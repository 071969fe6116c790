//! Filtering of the reconciled file set for display and bulk actions.
//!
//! # Public API
//! - [`ViewMode`]: Flat list of every file, or the files of the selected folders
//! - [`ViewState`]: Current mode plus the folder selection of the tree
//! - [`project`]: Records shown by the file view
//! - [`file_view_selection`] / [`dir_view_selection`] / [`all_filenames`]: File names a
//!   bulk action (commit, revert, stash...) operates on
//!
//! Tree mode is deliberately non-recursive: selecting a folder shows the files
//! directly inside it, and deeper files appear only when their own folder is
//! selected. Selections made through the tree for bulk actions are recursive.

use crate::core::{
    file_status::StatusMask,
    record::{FileMap, StatusRecord},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ViewMode {
    List,
    #[default]
    Tree,
}

/// Display state of the file and folder views
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub mode: ViewMode,
    selected_dirs: BTreeSet<String>,
}

impl ViewState {
    pub fn new(mode: ViewMode) -> Self {
        Self {
            mode,
            selected_dirs: BTreeSet::new(),
        }
    }

    pub fn selected_dirs(&self) -> &BTreeSet<String> {
        &self.selected_dirs
    }

    /// Replace the folder selection. Returns whether anything changed.
    pub fn select_dirs<I, S>(&mut self, dirs: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let next: BTreeSet<String> = dirs.into_iter().map(Into::into).collect();
        if next == self.selected_dirs {
            return false;
        }
        self.selected_dirs = next;
        true
    }

    /// Select only the workspace root, which is what a freshly opened tree shows
    pub fn select_root(&mut self) -> bool {
        self.select_dirs([String::new()])
    }

    /// Whether the file view should print paths instead of bare file names
    pub fn shows_full_paths(&self) -> bool {
        self.mode == ViewMode::List || self.selected_dirs.len() > 1
    }
}

/// Records visible in the file view, ordered by full path
pub fn project<'a>(
    files: &'a FileMap,
    mode: ViewMode,
    selected_paths: &BTreeSet<String>,
) -> Vec<&'a StatusRecord> {
    files
        .values()
        .filter(|record| match mode {
            ViewMode::List => true,
            ViewMode::Tree => selected_paths.contains(record.path()),
        })
        .collect()
}

/// Text the file view shows for a record
pub fn display_name(record: &StatusRecord, view: &ViewState) -> String {
    if view.shows_full_paths() {
        record.full_path()
    } else {
        record.filename().to_string()
    }
}

/// Full paths of the selected rows of the file view.
///
/// `rows` is what [`project`] returned and `selected` holds zero-based row
/// numbers. With nothing selected and `all_if_empty` every row is used.
pub fn file_view_selection(
    rows: &[&StatusRecord],
    selected: &[usize],
    mask: StatusMask,
    all_if_empty: bool,
) -> Vec<String> {
    let picked: Vec<&StatusRecord> = if selected.is_empty() && all_if_empty {
        rows.to_vec()
    } else {
        selected
            .iter()
            .filter_map(|&row| rows.get(row).copied())
            .collect()
    };

    picked
        .into_iter()
        .filter(|record| mask.accepts(record.status()))
        .map(StatusRecord::full_path)
        .collect()
}

/// Full paths of the files inside the selected folders, recursively.
///
/// The root folder (`""`) covers everything. With no folder selected the result
/// is every file matching `mask` when `all_if_empty` is set, and nothing otherwise.
pub fn dir_view_selection(
    files: &FileMap,
    selected_paths: &BTreeSet<String>,
    mask: StatusMask,
    all_if_empty: bool,
) -> Vec<String> {
    if selected_paths.is_empty() {
        return if all_if_empty {
            all_filenames(files, mask)
        } else {
            Vec::new()
        };
    }

    files
        .values()
        .filter(|record| mask.accepts(record.status()))
        .filter(|record| {
            selected_paths
                .iter()
                .any(|dir| is_within(record.path(), dir))
        })
        .map(StatusRecord::full_path)
        .collect()
}

/// Full paths of every file matching `mask`
pub fn all_filenames(files: &FileMap, mask: StatusMask) -> Vec<String> {
    files
        .values()
        .filter(|record| mask.accepts(record.status()))
        .map(StatusRecord::full_path)
        .collect()
}

fn is_within(path: &str, dir: &str) -> bool {
    dir.is_empty()
        || path == dir
        || (path.starts_with(dir) && path[dir.len()..].starts_with('/'))
}
