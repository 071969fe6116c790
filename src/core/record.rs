//! Reconciled per-file state produced by a workspace scan.
//!
//! # Public API
//! - [`StatusRecord`]: One file's classification for a single scan
//! - [`FileInfo`]: Filesystem metadata captured while scanning
//! - [`normalize_path`] / [`split_path`]: Canonical `/`-separated relative paths
//!
//! Records carry no identity across scans. They are rebuilt wholesale every time the
//! workspace is scanned and never mutated afterwards.

use crate::core::file_status::FileStatus;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::Metadata;

/// Canonical separator for every path the engine hands out
pub const PATH_SEPARATOR: char = '/';

/// Records of one scan keyed by full path
pub type FileMap = BTreeMap<String, StatusRecord>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileInfo {
    pub modified: Option<DateTime<Local>>,
    pub size: u64,
}

impl From<&Metadata> for FileInfo {
    fn from(metadata: &Metadata) -> Self {
        Self {
            modified: metadata.modified().ok().map(DateTime::<Local>::from),
            size: metadata.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusRecord {
    path: String,
    filename: String,
    status: FileStatus,
    file_info: Option<FileInfo>,
}

impl StatusRecord {
    /// Build a record from a workspace-relative file path in any separator style
    pub fn new(relative_path: &str, status: FileStatus, file_info: Option<FileInfo>) -> Self {
        let (path, filename) = split_path(&normalize_path(relative_path));
        Self {
            path,
            filename,
            status,
            file_info,
        }
    }

    /// Directory part, `""` for the workspace root
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn status(&self) -> FileStatus {
        self.status
    }

    pub fn file_info(&self) -> Option<&FileInfo> {
        self.file_info.as_ref()
    }

    /// Identity key of the record
    pub fn full_path(&self) -> String {
        join_path(&self.path, &self.filename)
    }

    /// Suffix after the last dot of the file name, empty when there is none
    pub fn extension(&self) -> &str {
        match self.filename.rfind('.') {
            Some(0) | None => "",
            Some(idx) => &self.filename[idx + 1..],
        }
    }
}

/// Normalize a relative path: `/` separators, no `./` prefix, no empty segments
pub fn normalize_path(path: &str) -> String {
    path.split(['/', '\\'])
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/")
}

/// Split a normalized path into `(directory, file name)`
pub fn split_path(path: &str) -> (String, String) {
    match path.rfind(PATH_SEPARATOR) {
        Some(idx) => (path[..idx].to_string(), path[idx + 1..].to_string()),
        None => (String::new(), path.to_string()),
    }
}

/// Join a directory and a name, treating `""` as the root
pub fn join_path(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{dir}{PATH_SEPARATOR}{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("src\\core\\main.rs"), "src/core/main.rs");
        assert_eq!(normalize_path("./a//b/"), "a/b");
        assert_eq!(normalize_path(""), "");
        assert_eq!(normalize_path("file.txt"), "file.txt");
    }

    #[test]
    fn test_split_path() {
        assert_eq!(
            split_path("a/b/c.txt"),
            ("a/b".to_string(), "c.txt".to_string())
        );
        assert_eq!(split_path("c.txt"), (String::new(), "c.txt".to_string()));
    }

    #[test]
    fn test_record_identity() {
        let record = StatusRecord::new("src\\lib.rs", FileStatus::Edited, None);
        assert_eq!(record.path(), "src");
        assert_eq!(record.filename(), "lib.rs");
        assert_eq!(record.full_path(), "src/lib.rs");

        let root = StatusRecord::new("README", FileStatus::Unchanged, None);
        assert_eq!(root.path(), "");
        assert_eq!(root.full_path(), "README");
    }

    #[test]
    fn test_extension() {
        assert_eq!(
            StatusRecord::new("a/b.tar.gz", FileStatus::Added, None).extension(),
            "gz"
        );
        assert_eq!(
            StatusRecord::new(".fossil-settings", FileStatus::Added, None).extension(),
            ""
        );
        assert_eq!(
            StatusRecord::new("Makefile", FileStatus::Added, None).extension(),
            ""
        );
    }

    #[test]
    fn test_record_serialization() -> anyhow::Result<()> {
        let record = StatusRecord::new(
            "docs/guide.md",
            FileStatus::Edited,
            Some(FileInfo {
                modified: None,
                size: 12,
            }),
        );
        let json = serde_json::to_string(&record)?;
        let back: StatusRecord = serde_json::from_str(&json)?;
        assert_eq!(record, back);
        Ok(())
    }
}
