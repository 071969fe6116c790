//! Core functionality for the fossil-navigator tool.
//!
//! This module holds the workspace reconciliation engine (scanning, folder tree,
//! view projection, stash index), the bridge to the `fossil` executable, and the
//! ambient pieces the CLI needs: errors, configuration and terminal output.

pub mod bridge;
pub mod colors;
pub mod command_init;
pub mod config;
pub mod dirs;
pub mod error;
pub mod file_status;
pub mod fossil;
pub mod index_parser;
pub mod output;
pub mod progress;
pub mod projection;
pub mod record;
pub mod scanner;
pub mod stash;
pub mod tree;
pub mod workspace;

// === Error handling ===
pub use error::{NavigatorError, Result};

// === Status model ===
// Classification of every file and the bitset used by selection queries
pub use file_status::{FileStatus, StatusMask};
pub use record::{FileInfo, FileMap, StatusRecord};

// === Fossil bridge ===
// Contract consumed by the scanner, and the implementation that runs `fossil`
pub use bridge::{Bridge, RepoHealth, StatusLine};
pub use fossil::FossilCli;

// === Reconciliation engine ===
pub use progress::{LogProgress, NullProgress, ProgressSink};
pub use projection::{ViewMode, ViewState};
pub use scanner::{IgnoreMatcher, ScanOptions};
pub use stash::StashIndex;
pub use tree::{build_tree, PathNode};
pub use workspace::{ScanOutcome, ScanSummary, Selection, Workspace, WorkspaceEvent};

// === CLI support ===
pub use command_init::{FilterOverrides, WorkspaceCommandContext, WorkspaceCommandInit};
pub use config::{NavigatorConfig, ViewFlags};
pub use index_parser::IndexParser;
pub use output::{print_error, print_info, print_section_header, print_success, print_warning};
