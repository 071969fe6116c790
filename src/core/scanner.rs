//! Workspace scanning: merges the repository status listing with the files on disk.
//!
//! # Public API
//! - [`ScanOptions`]: Which classes of files the scan keeps
//! - [`IgnoreMatcher`]: Parsed user ignore glob
//! - [`scan`]: One full reconciliation pass producing a [`Snapshot`]
//!
//! # Reconciliation Rules
//! - Every path fossil reports is classified by its keyword; repeated paths keep the
//!   most specific status (see [`FileStatus::precedence`]).
//! - A reported path missing from disk survives only as `Deleted` or `Missing`.
//! - Files on disk that fossil did not report are untracked: `Ignored` when they match
//!   the user's ignore glob or the repository's `ignore-glob` setting, `Unknown`
//!   otherwise.
//! - Fossil's verdict always wins over either glob for reported paths.
//!
//! The scan never touches the caller's current collection. It returns a fresh
//! snapshot, or an outcome explaining why there is none.

use crate::core::{
    bridge::{Bridge, RepoHealth},
    error::{NavigatorError, Result},
    file_status::FileStatus,
    fossil::CHECKOUT_FILES,
    progress::ProgressSink,
    record::{normalize_path, FileInfo, FileMap, StatusRecord},
    stash::StashIndex,
};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use walkdir::{DirEntry, WalkDir};

/// Metadata directories of other version control systems
const VCS_DIRS: [&str; 4] = [".git", ".hg", ".svn", "_darcs"];

/// How many files the walk visits between progress updates
const UPDATE_EVERY: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    pub show_unknown: bool,
    pub show_ignored: bool,
    pub show_modified: bool,
    pub show_unchanged: bool,
    /// Comma or newline separated glob patterns
    pub ignore_glob: String,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            show_unknown: true,
            show_ignored: false,
            show_modified: true,
            show_unchanged: true,
            ignore_glob: String::new(),
        }
    }
}

impl ScanOptions {
    /// Whether a record with this status passes the view filters
    pub fn keeps(&self, status: FileStatus) -> bool {
        match status {
            FileStatus::Unknown => self.show_unknown,
            FileStatus::Ignored => self.show_ignored,
            FileStatus::Unchanged => self.show_unchanged,
            _ => self.show_modified,
        }
    }

    fn needs_walk(&self) -> bool {
        self.show_unknown || self.show_ignored
    }
}

#[derive(Debug, Clone, Default)]
pub struct IgnoreMatcher {
    patterns: Vec<glob::Pattern>,
}

impl IgnoreMatcher {
    pub fn parse(ignore_glob: &str) -> Result<Self> {
        let patterns = split_globs(ignore_glob)
            .map(|p| glob::Pattern::new(p).map_err(|e| NavigatorError::invalid_ignore_glob(p, e)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// Add the patterns of a glob list the user did not type, skipping the ones
    /// that do not parse
    pub fn extend_lenient(&mut self, ignore_glob: &str) {
        for pattern in split_globs(ignore_glob) {
            match glob::Pattern::new(pattern) {
                Ok(p) => self.patterns.push(p),
                Err(e) => log::warn!("Skipping ignore pattern '{pattern}': {e}"),
            }
        }
    }

    /// Match against the workspace-relative path or the bare file name
    pub fn matches(&self, relative_path: &str) -> bool {
        let filename = relative_path.rsplit('/').next().unwrap_or(relative_path);
        self.patterns
            .iter()
            .any(|p| p.matches(relative_path) || p.matches(filename))
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

fn split_globs(ignore_glob: &str) -> impl Iterator<Item = &str> {
    ignore_glob
        .split([',', '\n'])
        .map(str::trim)
        .filter(|p| !p.is_empty())
}

/// Result of a completed scan, ready to replace a workspace's collection
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub files: FileMap,
    pub paths: BTreeSet<String>,
    pub stashes: StashIndex,
    /// Reported files dropped because they vanished from disk
    pub dropped: Vec<String>,
}

#[derive(Debug)]
pub enum ScanReport {
    Completed(Snapshot),
    Cancelled,
    Unavailable(RepoHealth),
}

/// Run one full scan of the bridge's workspace
pub fn scan(
    bridge: &dyn Bridge,
    options: &ScanOptions,
    progress: &mut dyn ProgressSink,
    cancel: &AtomicBool,
) -> Result<ScanReport> {
    progress.begin_process("Scanning workspace...");
    let report = run_scan(bridge, options, progress, cancel);
    progress.end_process();

    match report {
        Err(NavigatorError::Cancelled) => Ok(ScanReport::Cancelled),
        other => other,
    }
}

fn run_scan(
    bridge: &dyn Bridge,
    options: &ScanOptions,
    progress: &mut dyn ProgressSink,
    cancel: &AtomicBool,
) -> Result<ScanReport> {
    let mut matcher = IgnoreMatcher::parse(&options.ignore_glob)?;

    poll_cancel(cancel)?;
    let health = bridge.repository_health();
    if health != RepoHealth::Ok {
        log::info!("Workspace unavailable: {health:?}");
        return Ok(ScanReport::Unavailable(health));
    }
    poll_cancel(cancel)?;

    let reported = collapse_status_lines(bridge, cancel)?;
    log::debug!("fossil reported {} files", reported.len());
    poll_cancel(cancel)?;

    let mut stashes = StashIndex::new();
    stashes.refresh(bridge, cancel)?;
    poll_cancel(cancel)?;

    let root = bridge.workspace_root();
    let mut disk = if options.needs_walk() {
        if let Some(repo_glob) = query_repository_glob(bridge, cancel)? {
            log::debug!("Repository ignore-glob: {repo_glob}");
            matcher.extend_lenient(&repo_glob);
        }
        poll_cancel(cancel)?;
        Some(walk_workspace(root, progress, cancel)?)
    } else {
        None
    };

    let mut snapshot = Snapshot {
        stashes,
        ..Snapshot::default()
    };

    for (path, status) in reported {
        let info = match disk.as_mut() {
            Some(listing) => listing.remove(&path),
            None => stat_file(root, &path),
        };

        if !options.keeps(status) {
            continue;
        }

        let info = match (info, status.expects_missing_file()) {
            (_, true) => None,
            (Some(info), false) => Some(info),
            (None, false) => {
                let err = NavigatorError::filesystem_inconsistency(&path);
                log::warn!("Dropping {} file: {err}", status.description());
                snapshot.dropped.push(path);
                continue;
            }
        };

        insert_record(&mut snapshot, StatusRecord::new(&path, status, info));
    }

    for (path, info) in disk.unwrap_or_default() {
        let status = if matcher.matches(&path) {
            FileStatus::Ignored
        } else {
            FileStatus::Unknown
        };
        if options.keeps(status) {
            insert_record(&mut snapshot, StatusRecord::new(&path, status, Some(info)));
        }
    }

    log::info!(
        "Scanned {} files in {} folders, {} stashes",
        snapshot.files.len(),
        snapshot.paths.len(),
        snapshot.stashes.len()
    );
    Ok(ScanReport::Completed(snapshot))
}

fn poll_cancel(cancel: &AtomicBool) -> Result<()> {
    if cancel.load(Ordering::SeqCst) {
        return Err(NavigatorError::Cancelled);
    }
    Ok(())
}

/// The repository's ignore-glob setting. A failed settings query only costs the
/// Ignored classification, so it does not abort the scan.
fn query_repository_glob(bridge: &dyn Bridge, cancel: &AtomicBool) -> Result<Option<String>> {
    match bridge.query_ignore_glob(cancel) {
        Ok(glob) => Ok(glob),
        Err(NavigatorError::Cancelled) => Err(NavigatorError::Cancelled),
        Err(e) => {
            log::warn!("Ignoring repository ignore-glob: {e}");
            Ok(None)
        }
    }
}

/// Query the status listing and keep one status per normalized path
fn collapse_status_lines(
    bridge: &dyn Bridge,
    cancel: &AtomicBool,
) -> Result<BTreeMap<String, FileStatus>> {
    let mut reported: BTreeMap<String, FileStatus> = BTreeMap::new();
    for line in bridge.query_status(cancel)? {
        let path = normalize_path(&line.path);
        if path.is_empty() {
            continue;
        }
        let status = FileStatus::from_keyword(&line.keyword);
        reported
            .entry(path)
            .and_modify(|current| *current = current.most_specific(status))
            .or_insert(status);
    }
    Ok(reported)
}

fn insert_record(snapshot: &mut Snapshot, record: StatusRecord) {
    snapshot.paths.insert(record.path().to_string());
    snapshot.files.insert(record.full_path(), record);
}

fn stat_file(root: &Path, relative_path: &str) -> Option<FileInfo> {
    std::fs::symlink_metadata(root.join(relative_path))
        .ok()
        .map(|metadata| FileInfo::from(&metadata))
}

fn is_skipped(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    if entry.file_type().is_dir() {
        entry.depth() > 0 && VCS_DIRS.contains(&name.as_ref())
    } else {
        entry.depth() == 1 && CHECKOUT_FILES.contains(&name.as_ref())
    }
}

/// Every non-directory entry under `root`, keyed by normalized relative path
fn walk_workspace(
    root: &Path,
    progress: &mut dyn ProgressSink,
    cancel: &AtomicBool,
) -> Result<BTreeMap<String, FileInfo>> {
    let mut listing = BTreeMap::new();

    let walker = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| !is_skipped(entry));

    for (visited, entry) in walker.enumerate() {
        if visited % UPDATE_EVERY == 0 {
            progress.update_process(&format!("Scanning workspace... {visited} entries"));
            poll_cancel(cancel)?;
        }

        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Skipping unreadable entry: {e}");
                continue;
            }
        };
        if entry.file_type().is_dir() {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let relative = normalize_path(&relative.to_string_lossy());

        match entry.metadata() {
            Ok(metadata) => {
                listing.insert(relative, FileInfo::from(&metadata));
            }
            Err(e) => log::warn!("Cannot stat {relative}: {e}"),
        }
    }

    Ok(listing)
}
