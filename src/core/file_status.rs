//! Type-safe workspace file status classification.
//!
//! This module defines [`FileStatus`], the single classification every reconciled file
//! receives, and [`StatusMask`], a bitset over those classifications used by selection
//! queries ("every modified file", "every tracked file", ...).
//!
//! # Public API
//! - [`FileStatus`]: Mutually exclusive status of one workspace file
//! - [`StatusMask`]: Bitset over [`FileStatus`] values with the common composites
//!
//! # Key Features
//! - **Keyword mapping**: Conversion from the keywords `fossil ls -l` prints
//! - **Precedence**: Total order used to collapse duplicate status lines
//! - **Display formatting**: Short codes and human-readable descriptions

use crate::core::error::{NavigatorError, Result};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a single file after reconciling the disk with the repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileStatus {
    /// Tracked, content differs from the checkout
    Edited,
    /// Tracked, content identical to the checkout
    Unchanged,
    /// Scheduled for addition
    Added,
    /// Scheduled for removal
    Deleted,
    /// Renamed in the checkout
    Renamed,
    /// Tracked but gone from disk
    Missing,
    /// Has unresolved merge conflicts
    Conflicted,
    /// On disk, not tracked
    Unknown,
    /// On disk, not tracked, matches an ignore pattern
    Ignored,
}

impl FileStatus {
    pub const ALL: [FileStatus; 9] = [
        FileStatus::Edited,
        FileStatus::Unchanged,
        FileStatus::Added,
        FileStatus::Deleted,
        FileStatus::Renamed,
        FileStatus::Missing,
        FileStatus::Conflicted,
        FileStatus::Unknown,
        FileStatus::Ignored,
    ];

    /// Map a keyword from the repository status listing.
    ///
    /// Unrecognised keywords classify as [`FileStatus::Unknown`].
    pub fn from_keyword(keyword: &str) -> FileStatus {
        match keyword.trim().to_ascii_uppercase().as_str() {
            "EDITED" | "UPDATED" => FileStatus::Edited,
            "UNCHANGED" => FileStatus::Unchanged,
            "ADDED" => FileStatus::Added,
            "DELETED" => FileStatus::Deleted,
            "RENAMED" => FileStatus::Renamed,
            "MISSING" => FileStatus::Missing,
            "CONFLICT" | "CONFLICTED" => FileStatus::Conflicted,
            "IGNORED" => FileStatus::Ignored,
            _ => FileStatus::Unknown,
        }
    }

    /// Precedence used when the same path is reported more than once.
    ///
    /// Higher wins: Conflicted > Renamed > Deleted > Added > Edited > Missing >
    /// Unchanged > Unknown > Ignored.
    pub fn precedence(&self) -> u8 {
        match self {
            FileStatus::Conflicted => 8,
            FileStatus::Renamed => 7,
            FileStatus::Deleted => 6,
            FileStatus::Added => 5,
            FileStatus::Edited => 4,
            FileStatus::Missing => 3,
            FileStatus::Unchanged => 2,
            FileStatus::Unknown => 1,
            FileStatus::Ignored => 0,
        }
    }

    /// Pick the more specific of two statuses reported for one path
    pub fn most_specific(self, other: FileStatus) -> FileStatus {
        if other.precedence() > self.precedence() {
            other
        } else {
            self
        }
    }

    /// Whether a record with this status is expected to have no file on disk
    pub fn expects_missing_file(&self) -> bool {
        matches!(self, FileStatus::Deleted | FileStatus::Missing)
    }

    /// Whether this status counts as a modification of tracked content
    pub fn is_modified(&self) -> bool {
        StatusMask::MODIFIED.contains(self.mask())
    }

    /// Whether the repository tracks this file
    pub fn is_tracked(&self) -> bool {
        StatusMask::REPO.contains(self.mask())
    }

    /// Single-bit mask for this status
    pub fn mask(&self) -> StatusMask {
        match self {
            FileStatus::Edited => StatusMask::EDITED,
            FileStatus::Unchanged => StatusMask::UNCHANGED,
            FileStatus::Added => StatusMask::ADDED,
            FileStatus::Deleted => StatusMask::DELETED,
            FileStatus::Renamed => StatusMask::RENAMED,
            FileStatus::Missing => StatusMask::MISSING,
            FileStatus::Conflicted => StatusMask::CONFLICTED,
            FileStatus::Unknown => StatusMask::UNKNOWN,
            FileStatus::Ignored => StatusMask::IGNORED,
        }
    }

    /// Short code for aligned list output
    pub fn as_str(&self) -> &'static str {
        match self {
            FileStatus::Edited => "E",
            FileStatus::Unchanged => "=",
            FileStatus::Added => "A",
            FileStatus::Deleted => "D",
            FileStatus::Renamed => "R",
            FileStatus::Missing => "!",
            FileStatus::Conflicted => "C",
            FileStatus::Unknown => "?",
            FileStatus::Ignored => "I",
        }
    }

    /// Human-readable description for status
    pub fn description(&self) -> &'static str {
        match self {
            FileStatus::Edited => "edited",
            FileStatus::Unchanged => "unchanged",
            FileStatus::Added => "added",
            FileStatus::Deleted => "deleted",
            FileStatus::Renamed => "renamed",
            FileStatus::Missing => "missing",
            FileStatus::Conflicted => "conflicted",
            FileStatus::Unknown => "unknown",
            FileStatus::Ignored => "ignored",
        }
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

bitflags! {
    /// Set of statuses accepted by a selection query
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct StatusMask: u16 {
        const EDITED = 1 << 0;
        const UNCHANGED = 1 << 1;
        const ADDED = 1 << 2;
        const DELETED = 1 << 3;
        const RENAMED = 1 << 4;
        const MISSING = 1 << 5;
        const CONFLICTED = 1 << 6;
        const UNKNOWN = 1 << 7;
        const IGNORED = 1 << 8;

        const MODIFIED = Self::EDITED.bits()
            | Self::ADDED.bits()
            | Self::DELETED.bits()
            | Self::RENAMED.bits()
            | Self::MISSING.bits()
            | Self::CONFLICTED.bits();
        const REPO = Self::MODIFIED.bits() | Self::UNCHANGED.bits();
        const ALL = Self::REPO.bits() | Self::UNKNOWN.bits() | Self::IGNORED.bits();
    }
}

impl StatusMask {
    /// Whether a status is accepted by this mask
    pub fn accepts(&self, status: FileStatus) -> bool {
        self.contains(status.mask())
    }

    /// Parse a comma separated list like `edited,added` or `modified`
    pub fn parse(input: &str) -> Result<StatusMask> {
        let mut mask = StatusMask::empty();
        for name in input.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            mask |= match name.to_ascii_lowercase().as_str() {
                "edited" => StatusMask::EDITED,
                "unchanged" => StatusMask::UNCHANGED,
                "added" => StatusMask::ADDED,
                "deleted" => StatusMask::DELETED,
                "renamed" => StatusMask::RENAMED,
                "missing" => StatusMask::MISSING,
                "conflicted" => StatusMask::CONFLICTED,
                "unknown" => StatusMask::UNKNOWN,
                "ignored" => StatusMask::IGNORED,
                "modified" => StatusMask::MODIFIED,
                "repo" => StatusMask::REPO,
                "all" => StatusMask::ALL,
                _ => return Err(NavigatorError::unknown_status_name(name)),
            };
        }
        Ok(mask)
    }
}

impl Default for StatusMask {
    fn default() -> Self {
        StatusMask::ALL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_keyword() {
        assert_eq!(FileStatus::from_keyword("EDITED"), FileStatus::Edited);
        assert_eq!(FileStatus::from_keyword("UNCHANGED"), FileStatus::Unchanged);
        assert_eq!(FileStatus::from_keyword("ADDED"), FileStatus::Added);
        assert_eq!(FileStatus::from_keyword("DELETED"), FileStatus::Deleted);
        assert_eq!(FileStatus::from_keyword("RENAMED"), FileStatus::Renamed);
        assert_eq!(FileStatus::from_keyword("MISSING"), FileStatus::Missing);
        assert_eq!(FileStatus::from_keyword("CONFLICT"), FileStatus::Conflicted);
        assert_eq!(FileStatus::from_keyword("EXTRA"), FileStatus::Unknown);
        assert_eq!(FileStatus::from_keyword("IGNORED"), FileStatus::Ignored);
        assert_eq!(FileStatus::from_keyword("SOMETHING"), FileStatus::Unknown);
        assert_eq!(FileStatus::from_keyword(" edited "), FileStatus::Edited);
    }

    #[test]
    fn test_precedence_order() {
        let ordered = [
            FileStatus::Conflicted,
            FileStatus::Renamed,
            FileStatus::Deleted,
            FileStatus::Added,
            FileStatus::Edited,
            FileStatus::Missing,
            FileStatus::Unchanged,
            FileStatus::Unknown,
            FileStatus::Ignored,
        ];
        for pair in ordered.windows(2) {
            assert!(pair[0].precedence() > pair[1].precedence());
        }
    }

    #[test]
    fn test_most_specific_is_symmetric() {
        assert_eq!(
            FileStatus::Edited.most_specific(FileStatus::Conflicted),
            FileStatus::Conflicted
        );
        assert_eq!(
            FileStatus::Conflicted.most_specific(FileStatus::Edited),
            FileStatus::Conflicted
        );
        assert_eq!(
            FileStatus::Unknown.most_specific(FileStatus::Ignored),
            FileStatus::Unknown
        );
    }

    #[test]
    fn test_composite_masks() {
        assert!(FileStatus::Edited.is_modified());
        assert!(FileStatus::Missing.is_modified());
        assert!(!FileStatus::Unchanged.is_modified());
        assert!(FileStatus::Unchanged.is_tracked());
        assert!(!FileStatus::Unknown.is_tracked());
        assert!(!FileStatus::Ignored.is_tracked());
        for status in FileStatus::ALL {
            assert!(StatusMask::ALL.accepts(status));
        }
    }

    #[test]
    fn test_expects_missing_file() {
        assert!(FileStatus::Deleted.expects_missing_file());
        assert!(FileStatus::Missing.expects_missing_file());
        assert!(!FileStatus::Edited.expects_missing_file());
    }

    #[test]
    fn test_mask_parse() {
        assert_eq!(
            StatusMask::parse("edited,added").unwrap(),
            StatusMask::EDITED | StatusMask::ADDED
        );
        assert_eq!(StatusMask::parse("modified").unwrap(), StatusMask::MODIFIED);
        assert_eq!(StatusMask::parse("").unwrap(), StatusMask::empty());
        assert!(StatusMask::parse("bogus")
            .unwrap_err()
            .to_string()
            .contains("Unknown status name 'bogus'"));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", FileStatus::Conflicted), "conflicted");
        assert_eq!(FileStatus::Missing.as_str(), "!");
    }
}
